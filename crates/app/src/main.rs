mod config;

use std::fmt;
use std::time::Duration;

use grammar_core::model::{
    ExerciseId, GrammarCategory, LearningGoal, Lesson, LessonId, ProficiencyLevel,
};
use services::{AppServices, Clock, ExerciseSession, NavigationPolicy, OnboardingForm};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, parse_delay_ms, parse_navigation};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingId { command: &'static str },
    UnknownArg(String),
    InvalidValue { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingId { command } => write!(f, "{command} requires an id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.parse()
        .map_err(|_| ArgsError::InvalidValue { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [overview]");
    eprintln!("  cargo run -p app -- lessons  [--category <key>] [--level <key>] [--json]");
    eprintln!("  cargo run -p app -- lesson   <id> [--json]");
    eprintln!("  cargo run -p app -- exercise <id> [--answers <a,b,..>] [--score <0..1>] [--minutes <n>]");
    eprintln!("  cargo run -p app -- progress --minutes <n>");
    eprintln!("  cargo run -p app -- onboard  [--name <name>] [--email <email>] [--level <key>] [--goal <key>]");
    eprintln!();
    eprintln!("Global flags:");
    eprintln!("  --log <filter>  --delay-ms <ms>  --navigation answered|all");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GRAMMAR_LOG (or RUST_LOG), GRAMMAR_LESSON_DELAY_MS, GRAMMAR_NAVIGATION");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Overview,
    Lessons,
    Lesson,
    Exercise,
    Progress,
    Onboard,
}

impl CommandKind {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "overview" => Some(Self::Overview),
            "lessons" => Some(Self::Lessons),
            "lesson" => Some(Self::Lesson),
            "exercise" => Some(Self::Exercise),
            "progress" => Some(Self::Progress),
            "onboard" => Some(Self::Onboard),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Lessons => "lessons",
            Self::Lesson => "lesson",
            Self::Exercise => "exercise",
            Self::Progress => "progress",
            Self::Onboard => "onboard",
        }
    }
}

#[derive(Debug)]
enum Command {
    Overview,
    Lessons {
        category: Option<GrammarCategory>,
        level: Option<ProficiencyLevel>,
        json: bool,
    },
    Lesson {
        id: LessonId,
        json: bool,
    },
    Exercise {
        id: ExerciseId,
        answers: Vec<String>,
        score: Option<f32>,
        minutes: u32,
    },
    Progress {
        minutes: u32,
    },
    Onboard(OnboardingForm),
}

/// Values collected from flags before they are checked against the command.
#[derive(Debug, Default)]
struct Flags {
    id: Option<String>,
    category: Option<GrammarCategory>,
    level: Option<ProficiencyLevel>,
    goal: Option<LearningGoal>,
    json: bool,
    answers: Vec<String>,
    score: Option<f32>,
    minutes: Option<u32>,
    name: Option<String>,
    email: Option<String>,
}

struct Args {
    command: Command,
    config: AppConfig,
}

impl Args {
    fn parse(
        kind: CommandKind,
        args: &mut impl Iterator<Item = String>,
        mut config: AppConfig,
    ) -> Result<Self, ArgsError> {
        let mut flags = Flags::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--log" => config.log_filter = require_value(args, "--log")?,
                "--delay-ms" => {
                    let raw = require_value(args, "--delay-ms")?;
                    config.lesson_delay = parse_delay_ms(&raw)
                        .map_err(|_| ArgsError::InvalidValue { flag: "--delay-ms", raw })?;
                }
                "--navigation" => {
                    let raw = require_value(args, "--navigation")?;
                    config.navigation = parse_navigation(&raw)
                        .map_err(|_| ArgsError::InvalidValue { flag: "--navigation", raw })?;
                }
                "--all-questions" => config.navigation = NavigationPolicy::AllQuestions,
                "--category" => flags.category = Some(parse_value(args, "--category")?),
                "--level" => flags.level = Some(parse_value(args, "--level")?),
                "--goal" => flags.goal = Some(parse_value(args, "--goal")?),
                "--json" => flags.json = true,
                "--answers" => {
                    let raw = require_value(args, "--answers")?;
                    flags.answers = raw.split(',').map(|a| a.trim().to_string()).collect();
                }
                "--score" => flags.score = Some(parse_value(args, "--score")?),
                "--minutes" => flags.minutes = Some(parse_value(args, "--minutes")?),
                "--name" => flags.name = Some(require_value(args, "--name")?),
                "--email" => flags.email = Some(require_value(args, "--email")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if !arg.starts_with("--") && flags.id.is_none() => flags.id = Some(arg),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = Self::build(kind, flags)?;
        Ok(Self { command, config })
    }

    fn build(kind: CommandKind, flags: Flags) -> Result<Command, ArgsError> {
        let id = |flags: &Flags| {
            flags
                .id
                .clone()
                .ok_or(ArgsError::MissingId { command: kind.name() })
        };

        let command = match kind {
            CommandKind::Overview => Command::Overview,
            CommandKind::Lessons => Command::Lessons {
                category: flags.category,
                level: flags.level,
                json: flags.json,
            },
            CommandKind::Lesson => {
                let raw = id(&flags)?;
                let id = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidValue { flag: "lesson id", raw })?;
                Command::Lesson {
                    id,
                    json: flags.json,
                }
            }
            CommandKind::Exercise => {
                let raw = id(&flags)?;
                let id = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidValue { flag: "exercise id", raw })?;
                Command::Exercise {
                    id,
                    answers: flags.answers,
                    score: flags.score,
                    minutes: flags.minutes.unwrap_or(0),
                }
            }
            CommandKind::Progress => Command::Progress {
                minutes: flags
                    .minutes
                    .ok_or(ArgsError::MissingValue { flag: "--minutes" })?,
            },
            CommandKind::Onboard => {
                let defaults = OnboardingForm::default();
                Command::Onboard(OnboardingForm {
                    name: flags.name.unwrap_or_default(),
                    email: flags.email.unwrap_or_default(),
                    level: flags.level.unwrap_or(defaults.level),
                    learning_goal: flags.goal.unwrap_or(defaults.learning_goal),
                })
            }
        };
        Ok(command)
    }
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let kind = match argv.first().map(String::as_str) {
        None => CommandKind::Overview,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => CommandKind::Overview,
        Some(first) => CommandKind::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let config = AppConfig::from_env()?;
    let mut iter = argv.into_iter();
    let parsed = Args::parse(kind, &mut iter, config).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(&parsed.config.log_filter);
    tracing::debug!(?kind, config = ?parsed.config, "starting");

    let app = AppServices::new_in_memory(Clock::default_clock(), parsed.config.service_options())?;

    match parsed.command {
        Command::Overview => overview(&app).await,
        Command::Lessons {
            category,
            level,
            json,
        } => list_lessons(&app, category, level, json).await,
        Command::Lesson { id, json } => show_lesson(&app, &id, json).await,
        Command::Exercise {
            id,
            answers,
            score,
            minutes,
        } => run_exercise(&app, &id, &answers, score, minutes).await,
        Command::Progress { minutes } => record_progress(&app, minutes).await,
        Command::Onboard(form) => onboard(&app, form).await,
    }
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

async fn overview(app: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let users = app.user_service();
    match users.get_current_user().await? {
        Some(user) => {
            println!("Welcome back, {}!", user.name());
            println!(
                "  {} · {} · {} day streak",
                user.level(),
                user.learning_goal(),
                user.streak_days()
            );
            if let Some(progress) = app.progress_service().get_user_progress(user.id()).await? {
                println!(
                    "  {} minutes studied, {} lessons completed",
                    progress.total_time_spent_minutes(),
                    progress.completed_lessons().len()
                );
            }
            println!("  daily goal: {} minutes", user.daily_goal_minutes());
        }
        None => println!("Nobody is logged in. Run `onboard` to create a profile."),
    }

    let feed = app.lesson_feed();
    if feed.delay() > Duration::ZERO {
        eprintln!("loading lessons...");
    }
    feed.load().await?;

    for category in GrammarCategory::ALL {
        let lessons = feed.lessons_by_category(category);
        if lessons.is_empty() {
            continue;
        }
        println!();
        println!("{category}");
        for lesson in &lessons {
            print_lesson_line(lesson);
        }
    }
    Ok(())
}

async fn list_lessons(
    app: &AppServices,
    category: Option<GrammarCategory>,
    level: Option<ProficiencyLevel>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = app.lesson_service();
    let mut lessons = match category {
        Some(category) => service.get_lessons_in_order(category).await?,
        None => service.get_lessons().await?,
    };
    if let Some(level) = level {
        lessons.retain(|l| l.level() == level);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&lessons)?);
        return Ok(());
    }
    if lessons.is_empty() {
        println!("No lessons match.");
    }
    for lesson in &lessons {
        print_lesson_line(lesson);
    }
    Ok(())
}

async fn show_lesson(
    app: &AppServices,
    id: &LessonId,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let lessons = app.lesson_service();
    let Some(lesson) = lessons.get_lesson_by_id(id).await? else {
        println!("Lesson {id} not found.");
        return Ok(());
    };
    let guide = lessons.lesson_guide(id).await?;
    let exercises = app.exercise_service().get_exercises_for_lesson(id).await?;

    if json {
        let value = serde_json::json!({
            "lesson": lesson,
            "guide": guide,
            "exercises": exercises,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", lesson.title());
    println!("{} · {}", lesson.category(), lesson.level());
    println!();
    println!("{}", lesson.description());
    println!();
    println!("{}", lesson.content());
    if let Some(guide) = guide {
        println!();
        println!("Formula: {}", guide.formula);
        for point in guide.usage_points {
            println!("  - {point}");
        }
    }
    if !lesson.examples().is_empty() {
        println!();
        println!("Examples:");
        for example in lesson.examples() {
            println!("  \"{}\"", example.sentence());
            println!("     {}", example.explanation());
        }
    }
    if !exercises.is_empty() {
        println!();
        println!("Practice:");
        for exercise in &exercises {
            println!(
                "  [{}] {} ({}, {} questions)",
                exercise.id(),
                exercise.title(),
                exercise.kind(),
                exercise.question_count()
            );
        }
    }
    Ok(())
}

async fn run_exercise(
    app: &AppServices,
    id: &ExerciseId,
    answers: &[String],
    score: Option<f32>,
    minutes: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(mut session) = app.exercise_service().start_session(id).await? else {
        println!("Exercise {id} not found.");
        return Ok(());
    };

    for (index, answer) in answers.iter().enumerate() {
        session.submit_answer(index, answer.as_str())?;
    }

    loop {
        print_question(&session);
        if !session.move_to_next() {
            break;
        }
    }

    if answers.is_empty() {
        return Ok(());
    }
    session.submit()?;
    let progress = session.progress();
    println!();
    println!("Submitted {} of {} answers.", progress.answered, progress.total);

    if let Some(score) = score {
        let Some(user) = app.user_service().get_current_user().await? else {
            println!("Nobody is logged in; score not recorded.");
            return Ok(());
        };
        let updated = app
            .progress_service()
            .update_exercise_progress(user.id(), id, score, minutes)
            .await?;
        println!(
            "Recorded score {score:.2}; {} minutes studied in total.",
            updated.total_time_spent_minutes()
        );
    }
    Ok(())
}

async fn record_progress(app: &AppServices, minutes: u32) -> Result<(), Box<dyn std::error::Error>> {
    match app.user_service().update_user_progress(minutes).await? {
        Some(ratio) => println!("Daily goal: {:.0}%", ratio * 100.0),
        None => println!("Nobody is logged in; nothing recorded."),
    }
    Ok(())
}

async fn onboard(app: &AppServices, form: OnboardingForm) -> Result<(), Box<dyn std::error::Error>> {
    let user = app.user_service().complete_onboarding(form).await?;
    println!(
        "Welcome, {} ({}). Level {}, goal {}, {} minutes a day.",
        user.name(),
        user.email(),
        user.level(),
        user.learning_goal(),
        user.daily_goal_minutes()
    );
    Ok(())
}

fn print_lesson_line(lesson: &Lesson) {
    println!(
        "  [{}] {} ({}) - {}",
        lesson.id(),
        lesson.title(),
        lesson.level(),
        lesson.description()
    );
}

fn print_question(session: &ExerciseSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let index = session.current_question_index();
    println!();
    println!("{}. {}", index + 1, question.prompt());
    if let Some(options) = question.options() {
        println!("   options: {}", options.join(" / "));
    }
    if let Some(answer) = session.answers().get(index).filter(|a| !a.is_empty()) {
        println!("   your answer: {answer}");
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
