use colored::Colorize;

pub struct Theme {
    pub heading: fn(&str) -> String,
    pub pod_title: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub text: fn(&str) -> String,
    pub answer: fn(&str) -> String,
    pub link: fn(&str) -> String,
    pub note: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" | "" => Self::default_theme(),
            "plain" => Self::plain(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::default_theme() // Fallback to default
            }
        }
    }

    fn default_theme() -> Self {
        Self {
            heading: |s| s.bright_magenta().italic().bold().underline().to_string(),
            pod_title: |s| s.cyan().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            text: |s| s.white().to_string(),
            answer: |s| s.yellow().bold().to_string(),
            link: |s| s.bright_black().italic().to_string(),
            note: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn plain() -> Self {
        Self {
            heading: |s| s.to_string(),
            pod_title: |s| s.to_string(),
            line: |s| s.to_string(),
            text: |s| s.to_string(),
            answer: |s| s.to_string(),
            link: |s| s.to_string(),
            note: |s| s.to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            heading: |s| s.blue().bold().underline().to_string(),
            pod_title: |s| s.bright_cyan().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            text: |s| s.black().to_string(),
            answer: |s| s.red().bold().to_string(),
            link: |s| s.bright_blue().to_string(),
            note: |s| s.bright_black().italic().to_string(),
        }
    }
}
