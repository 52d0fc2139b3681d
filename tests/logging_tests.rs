//! 日志配置功能测试

use wolfram::infrastructure::config::Logging;

#[test]
fn test_log_level_parsing() {
    let cases = [
        ("DEBUG", "debug"),
        ("INFO", "info"),
        ("WARN", "warn"),
        ("ERROR", "error"),
        ("trace", "trace"),
        ("verbose", "warn"),
    ];

    for (level, expected) in cases {
        let logging = Logging {
            level: level.to_string(),
            ..Logging::default()
        };
        assert_eq!(logging.filter_directive(), expected);
    }
}

#[test]
fn test_log_level_default() {
    let logging = Logging::default();

    assert!(logging.enable);
    assert!(logging.path.is_none());
    assert_eq!(logging.level, "WARN");
    assert_eq!(logging.filter_directive(), "warn");
}
