use anyhow::Result;
use chrono::NaiveDate;
use hr_magic_box::core::export::UTF8_BOM;
use hr_magic_box::core::grouping::expected_group_count;
use hr_magic_box::core::name_parser::parse;
use hr_magic_box::core::DrawSettings;
use hr_magic_box::{GroupingEngine, HrError, HrSession, LocalStorage, TomlConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn session_in(dir: &TempDir, extra_toml: &str) -> Result<HrSession<LocalStorage>> {
    let output = dir.path().join("out");
    let toml_content = format!(
        "[export]\noutput_path = '{}'\n{}",
        output.to_string_lossy(),
        extra_toml
    );
    let config = TomlConfig::from_toml_str(&toml_content)?;
    Ok(HrSession::new(LocalStorage::new(".".to_string()), config))
}

#[test]
fn test_five_participants_in_pairs() {
    let pool = parse("A\nB\nC\nD\nE");
    let mut rng = StdRng::seed_from_u64(77);
    let groups = GroupingEngine::default().group(&pool, 2, &mut rng);

    let mut sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(groups.iter().map(|g| g.len()).sum::<usize>(), 5);
}

#[test]
fn test_every_member_appears_exactly_once() {
    let names: Vec<String> = (1..=37).map(|i| format!("員工{}", i)).collect();
    let pool = parse(&names.join(","));
    let mut rng = StdRng::seed_from_u64(8);

    let groups = GroupingEngine::default().group(&pool, 6, &mut rng);
    assert_eq!(groups.len(), expected_group_count(37, 6));

    let ids: Vec<_> = groups.iter().flat_map(|g| g.members.iter().map(|p| p.id)).collect();
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 37);
    assert_eq!(unique.len(), 37);
}

#[test]
fn test_shuffle_is_not_identity_for_every_seed() {
    let pool = parse("A\nB\nC\nD\nE\nF\nG\nH");
    let input_order: Vec<_> = pool.iter().map(|p| p.id).collect();

    let moved = (0..20u64).any(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let groups = GroupingEngine::default().group(&pool, 8, &mut rng);
        let order: Vec<_> = groups[0].members.iter().map(|p| p.id).collect();
        order != input_order
    });
    assert!(moved);
}

#[tokio::test]
async fn test_group_and_export_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = session_in(&temp_dir, "")?;
    session.load_text("王小明\n李大華\n張美麗\n趙又廷\n林美玲");

    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let report = session.group(2, Some(date), &mut rng).await?;

    assert_eq!(report.groups.len(), 3);
    let csv_path = report.csv_path.expect("csv should be written");
    assert!(csv_path.ends_with("分組結果_2026-10-19.csv"));

    let bytes = tokio::fs::read(&csv_path).await?;
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec())?;
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(lines[0], "組別,姓名");
    assert_eq!(lines.len(), 6);
    assert!(!text.ends_with('\n'));

    // 依組別再依成員順序輸出
    let mut expected = vec!["組別,姓名".to_string()];
    for group in &report.groups {
        for member in &group.members {
            expected.push(format!("{},{}", group.name, member.name));
        }
    }
    assert_eq!(lines, expected);
    Ok(())
}

#[tokio::test]
async fn test_custom_labels_and_header() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let extra = "header = ['Group', 'Name']\nfilename_prefix = 'groups'\n\n[grouping]\nlabel_template = 'Group {n}'\n";
    let mut session = session_in(&temp_dir, extra)?;
    session.load_text("Alice,Bob,Carol");

    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let report = session.group(2, Some(date), &mut rng).await?;

    assert_eq!(report.groups[0].name, "Group 1");
    assert_eq!(report.groups[1].name, "Group 2");

    let csv_path = report.csv_path.unwrap();
    assert!(csv_path.ends_with("groups_2026-01-02.csv"));
    let bytes = tokio::fs::read(&csv_path).await?;
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec())?;
    assert!(text.starts_with("Group,Name\nGroup 1,"));
    Ok(())
}

#[tokio::test]
async fn test_exported_csv_can_be_reimported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = session_in(&temp_dir, "")?;
    session.load_text("Alice\nBob\nCarol\nDave");

    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let report = session.group(2, Some(date), &mut rng).await?;
    let csv_path = report.csv_path.unwrap();

    // 匯出檔的每一格都會被當成一個名字，BOM 不會黏在第一個名字上
    let mut reimport = session_in(&temp_dir, "")?;
    let state = reimport.load_file(&csv_path).await?;
    let names: Vec<&str> = state.participants().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names[0], "組別");
    assert!(names.contains(&"Alice"));
    assert_eq!(names.len(), 2 + 4 * 2);
    Ok(())
}

#[tokio::test]
async fn test_empty_list_is_noop_without_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = session_in(&temp_dir, "")?;
    session.load_text("  \n , ");

    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let report = session.group(3, Some(date), &mut rng).await?;

    assert!(report.groups.is_empty());
    assert!(report.csv_path.is_none());
    assert!(!temp_dir.path().join("out").exists());
    Ok(())
}

#[tokio::test]
async fn test_group_size_below_two_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = session_in(&temp_dir, "")?;
    session.load_text("Alice\nBob");

    let mut rng = StdRng::seed_from_u64(5);
    let err = session.group(1, None, &mut rng).await.unwrap_err();
    assert!(matches!(err, HrError::InvalidConfigValueError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_load_file_rejects_unknown_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("names.xlsx");
    tokio::fs::write(&path, "Alice").await?;

    let mut session = session_in(&temp_dir, "")?;
    let err = session.load_file(&path.to_string_lossy()).await.unwrap_err();
    assert!(matches!(err, HrError::ValidationError { .. }));
    assert_eq!(session.participants().len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_session_draw_engine_uses_loaded_list() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("names.txt");
    tokio::fs::write(&path, "Alice\r\nBob\r\nCarol\r\n").await?;

    let mut session = session_in(&temp_dir, "")?;
    session.load_file(&path.to_string_lossy()).await?;
    let mut engine = session.draw_engine(DrawSettings {
        draw_count: 3,
        allow_repeat: false,
    })?;

    let mut rng = StdRng::seed_from_u64(6);
    let winners = engine.draw(&mut rng)?;
    let mut names: Vec<_> = winners.iter().map(|p| p.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    assert!(engine.pool().is_empty());
    Ok(())
}

#[test]
fn test_edits_reparse_after_configured_quiet_period() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = session_in(&temp_dir, "\n[input]\ndebounce_ms = 200\n")?;
    let start = Instant::now();

    session.edit_text("Alice", start);
    session.edit_text("Alice\nBob", start + Duration::from_millis(150));
    assert!(session.poll_edit(start + Duration::from_millis(300)).is_none());
    assert_eq!(session.participants().len(), 0);

    let state = session
        .poll_edit(start + Duration::from_millis(350))
        .expect("quiet period elapsed");
    assert_eq!(state.participant_count(), 2);
    assert!(!session.has_pending_edit());

    // 還在安靜期內的最後一次編輯由 commit 直接套用
    session.edit_text("Alice\nBob\nCarol", start + Duration::from_millis(400));
    assert!(session.poll_edit(start + Duration::from_millis(450)).is_none());
    assert_eq!(session.commit_edit().participant_count(), 3);
    assert!(!session.has_pending_edit());
    Ok(())
}

#[tokio::test]
async fn test_draw_settings_come_from_policy_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let extra = "\n[draw]\ndraw_count = 4\nallow_repeat = true\n";
    let mut session = session_in(&temp_dir, extra)?;
    session.load_text("Alice\nBob");

    let mut engine = session.draw_engine(session.config().draw_settings())?;
    let mut rng = StdRng::seed_from_u64(7);
    let winners = engine.draw(&mut rng)?;
    assert_eq!(winners.len(), 4);
    assert_eq!(engine.pool().len(), 2);
    Ok(())
}
