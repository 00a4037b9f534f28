use clap::Parser;
use hr_magic_box::core::animation::Frame;
use hr_magic_box::core::grouping::expected_group_count;
use hr_magic_box::core::name_parser::names_of;
use hr_magic_box::core::samples::{generate_names, sample_names};
use hr_magic_box::core::scheduler::IntervalScheduler;
use hr_magic_box::core::Screen;
use hr_magic_box::utils::{logger, validation::Validate};
use hr_magic_box::config::{DrawArgs, GroupArgs, NamesArgs};
use hr_magic_box::{CliConfig, Command, HrSession, LocalStorage, TomlConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hr-magic-box");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: CliConfig) -> hr_magic_box::Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };

    // 命令列覆蓋設定
    if let Command::Group(GroupArgs {
        output_path: Some(path),
        ..
    }) = &cli.command
    {
        config.export.output_path = Some(path.clone());
    }
    config.validate()?;

    let storage = LocalStorage::new(".".to_string());
    let mut session = HrSession::new(storage, config);

    match &cli.command {
        Command::Names(args) if args.sample || args.generate.is_some() => {
            let names = match args.generate {
                Some(count) => generate_names(count, &mut rng_from(args.seed)),
                None => sample_names(),
            };
            let text = names.join("\n");
            session.load_text(&text);
        }
        _ => match &cli.input {
            Some(path) => {
                session.load_file(path).await?;
            }
            None => read_stdin(&mut session).await?,
        },
    }

    match cli.command {
        Command::Names(args) => names(&mut session, &args),
        Command::Draw(args) => draw(&mut session, &args).await,
        Command::Group(args) => group(&mut session, &args).await,
    }
}

/// 逐行讀取標準輸入；貼上過程中的名單要安靜一段時間才重新解析
async fn read_stdin(session: &mut HrSession<LocalStorage>) -> hr_magic_box::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut text = String::new();

    while let Some(line) = lines.next_line().await? {
        if !text.is_empty() {
            text.push('\n');
        }
        let now = Instant::now();
        if let Some(state) = session.poll_edit(now) {
            tracing::debug!("Re-parsed {} names", state.participant_count());
        }
        text.push_str(&line);
        session.edit_text(text.clone(), now);
    }

    session.commit_edit();
    Ok(())
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn names(session: &mut HrSession<LocalStorage>, args: &NamesArgs) -> hr_magic_box::Result<()> {
    session.show(Screen::List);
    if args.dedupe {
        session.dedupe();
    }

    let state = session.state();
    let summary = state.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(state.participants())?);
        return Ok(());
    }

    println!("📋 {} ({} 筆)", Screen::List.label(), summary.count);
    for name in names_of(state.participants()) {
        println!("  {}", name);
    }
    if !summary.duplicates.is_empty() {
        println!();
        println!("⚠️ 發現重複項：{}", summary.preview);
        println!("💡 使用 --dedupe 排除重複姓名 ({})", summary.duplicates.len());
    }
    Ok(())
}

async fn draw(session: &mut HrSession<LocalStorage>, args: &DrawArgs) -> hr_magic_box::Result<()> {
    session.show(Screen::LuckyDraw);

    let settings = args.draw_settings(session.config().draw_settings());
    let mut engine = session.draw_engine(settings)?;
    let mut rng = rng_from(args.seed);

    for round in 1..=args.rounds {
        if engine.pool().is_empty() {
            tracing::warn!("No candidates left after {} round(s)", round - 1);
            break;
        }

        let winners = if args.animate {
            let (mut scheduler, cancel) = IntervalScheduler::new(session.config().frame_interval());
            let ctrl_c = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });

            let result = session
                .animated_draw(&mut engine, &mut scheduler, &mut rng, |frame| {
                    if let Frame::Preview(names) = frame {
                        eprint!("\r🎲 {}        ", names.join("  "));
                    }
                })
                .await;
            ctrl_c.abort();
            eprintln!();

            match result? {
                Some(winners) => winners,
                None => {
                    tracing::warn!("Draw cancelled, nothing committed");
                    break;
                }
            }
        } else {
            engine.draw(&mut rng)?
        };

        if !args.json {
            println!(
                "🎉 第 {} 輪：{}",
                round,
                names_of(&winners).join("、")
            );
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.numbered_history())?);
        return Ok(());
    }

    println!();
    println!("🏆 中獎歷史 ({})", engine.history().len());
    for entry in engine.numbered_history() {
        println!("  {:>3}. {}", entry.ordinal, entry.participant.name);
    }
    println!(
        "剩餘候選人: {}  目前規則: {}",
        engine.pool().len(),
        engine.rule_label()
    );
    Ok(())
}

async fn group(session: &mut HrSession<LocalStorage>, args: &GroupArgs) -> hr_magic_box::Result<()> {
    session.show(Screen::Grouping);

    let group_size = args.size.unwrap_or_else(|| session.config().group_size());
    let count = session.participants().len();
    tracing::info!(
        "預計組數: {} 組",
        expected_group_count(count, group_size)
    );

    let export_date = if args.no_export {
        None
    } else {
        Some(chrono::Local::now().date_naive())
    };
    let mut rng = rng_from(args.seed);
    let report = session.group(group_size, export_date, &mut rng).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.groups.is_empty() {
        println!("尚未分組，名單是空的");
        return Ok(());
    }

    for group in &report.groups {
        println!("{} ({} 人)", group.name, group.len());
        for member in &group.members {
            println!("  • {}", member.name);
        }
    }
    if let Some(path) = &report.csv_path {
        println!();
        println!("📁 CSV saved to: {}", path);
    }
    Ok(())
}
