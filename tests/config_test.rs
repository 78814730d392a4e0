// ==========================================
// 配置加载集成测试
// ==========================================
// 测试目标: 验证配置文件加载、默认值回填、校验失败与运行期覆写
// ==========================================

mod test_helpers;

use serde_json::json;
use shop_floor_planner::config::{config_keys, PlannerConfig};
use shop_floor_planner::domain::{PlanningSnapshot, Process};
use shop_floor_planner::{ApiError, ConfigError, ConfigManager, PlanApi, PlannerConfigReader};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_helpers::*;

// ==========================================
// 测试辅助函数
// ==========================================

fn write_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ==========================================
// 文件加载
// ==========================================

#[test]
fn test_load_full_config_file() {
    let file = write_config_file(
        r#"{
            "staff_count": 4,
            "daily_hours": 7.5,
            "calendar": {
                "work_start": "08:30",
                "work_end": "17:30",
                "breaks": [{"start": "12:00", "end": "12:45"}]
            },
            "batch_window_days": 3,
            "near_due_days": 2,
            "material_units_per_process": 0.5,
            "horizon_days": 5,
            "staff_names": ["Ann", "Ben", "Cid", "Dee"]
        }"#,
    );

    let manager = ConfigManager::from_json_file(file.path()).unwrap();

    assert_eq!(manager.source(), Some(file.path()));
    assert_eq!(manager.staff_count(), 4);
    assert_eq!(manager.daily_hours(), 7.5);
    assert_eq!(manager.batch_window_days(), 3);
    assert_eq!(manager.near_due_days(), 2);
    assert_eq!(manager.material_units_per_process(), 0.5);
    assert_eq!(manager.horizon_days(), 5);
    assert_eq!(manager.staff_names().len(), 4);

    let calendar = manager.calendar();
    assert_eq!(calendar.work_start, hm(8, 30));
    assert_eq!(calendar.work_end, hm(17, 30));
    assert_eq!(calendar.breaks.len(), 1);
    assert_eq!(calendar.breaks[0].start, hm(12, 0));
    assert_eq!(calendar.breaks[0].end, hm(12, 45));
}

#[test]
fn test_partial_config_falls_back_to_defaults() {
    let file = write_config_file(r#"{"staff_count": 3}"#);

    let manager = ConfigManager::from_json_file(file.path()).unwrap();

    let expected = PlannerConfig {
        staff_count: 3,
        ..PlannerConfig::default()
    };
    assert_eq!(manager.config(), &expected);
    assert_eq!(manager.calendar().breaks.len(), 1);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("planner.json");

    let result = ConfigManager::from_json_file(&missing);

    assert!(matches!(result, Err(ConfigError::FileReadError(_))));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let file = write_config_file(r#"{"staff_count": "#);

    let result = ConfigManager::from_json_file(file.path());

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_bad_time_format_is_parse_error() {
    let file = write_config_file(r#"{"calendar": {"work_start": "nine"}}"#);

    let result = ConfigManager::from_json_file(file.path());

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        r#"{"staff_count": 0}"#,
        r#"{"daily_hours": 0}"#,
        r#"{"daily_hours": 25}"#,
        r#"{"horizon_days": 0}"#,
        r#"{"batch_window_days": -1}"#,
        r#"{"batch_window_days": 100000}"#,
        r#"{"near_due_days": -1}"#,
        r#"{"near_due_days": 1000000000}"#,
        r#"{"calendar": {"work_start": "17:00", "work_end": "09:00", "breaks": []}}"#,
    ];

    for raw in cases {
        let file = write_config_file(raw);
        let result = ConfigManager::from_json_file(file.path());
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { .. })),
            "{} 应被拒绝",
            raw
        );
    }
}

// ==========================================
// 运行期覆写
// ==========================================

#[test]
fn test_update_config_revalidates() {
    let mut manager = ConfigManager::default();

    manager
        .update_config(config_keys::STAFF_COUNT, json!(5))
        .unwrap();
    assert_eq!(manager.staff_count(), 5);

    let err = manager
        .update_config(config_keys::STAFF_COUNT, json!(0))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(manager.staff_count(), 5);

    let err = manager.update_config("overtime", json!(true)).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey(_)));
}

#[test]
fn test_oversized_near_due_days_is_rejected_before_planning() {
    let config = PlannerConfig {
        near_due_days: 1_000_000_000,
        ..PlannerConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { ref key, .. }) if key == config_keys::NEAR_DUE_DAYS
    ));

    let api = PlanApi::new(Arc::new(config));
    let snapshot = PlanningSnapshot::new(today())
        .with_job(single_process_job("J1", today(), Process::new("Cutting", 1.0, 1)));
    assert!(matches!(
        api.plan(&snapshot),
        Err(ApiError::Config(ConfigError::InvalidValue { .. }))
    ));

    let mut manager = ConfigManager::default();
    assert!(manager
        .update_config(config_keys::NEAR_DUE_DAYS, json!(1_000_000_000))
        .is_err());
    assert_eq!(manager.near_due_days(), 1);
}

#[test]
fn test_config_snapshot_round_trips() {
    let mut manager = ConfigManager::default();
    manager
        .update_config(config_keys::HORIZON_DAYS, json!(3))
        .unwrap();

    let snapshot = manager.config_snapshot().unwrap();
    let restored = ConfigManager::from_json_str(&snapshot).unwrap();

    assert_eq!(restored.config(), manager.config());
    assert!(snapshot.contains("\"13:00\""));
}

// ==========================================
// 配置进入排产
// ==========================================

#[test]
fn test_calendar_without_working_time_fails_plan() {
    let config = default_config().with_calendar(calendar_with_break(hm(8, 0), hm(18, 0)));
    let api = PlanApi::new(Arc::new(config));
    let snapshot = PlanningSnapshot::new(today())
        .with_job(single_process_job("J1", today(), Process::new("Cutting", 1.0, 1)));

    let result = api.plan(&snapshot);

    assert!(matches!(
        result,
        Err(ApiError::Config(ConfigError::EmptyCalendar(_)))
    ));
}

#[test]
fn test_plain_config_struct_drives_planning() {
    let config = default_config()
        .with_staff(1, 8.0)
        .with_calendar(calendar_without_breaks(hm(7, 0), hm(15, 0)));
    let api = PlanApi::new(Arc::new(config));
    let snapshot = PlanningSnapshot::new(today())
        .with_job(single_process_job("J1", today(), Process::new("Cutting", 5.0, 1)));

    let report = api.plan(&snapshot).unwrap();

    let row = report.find("J1", 0).unwrap();
    assert_eq!(row.start, Some(at(7, 0)));
    assert_eq!(row.end, Some(at(12, 0)));
}
