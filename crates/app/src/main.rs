mod config;
mod quiz_runner;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use services::{AssessmentService, AuthService, JsonQuestionSource};
use storage::{InMemoryStore, JsonFileStore, KeyValueStore, SessionStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vida_core::content;
use vida_core::guard::{Decision, Route};
use vida_core::login::Credentials;
use vida_core::model::{BookingStep, BookingWizard, CourseProgress, LessonStart, VehicleType};

use crate::config::{AppConfig, StoreLocation};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    UnknownRoute { raw: String },
    InvalidValue { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing argument: {name}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownRoute { raw } => write!(f, "unknown route: {raw}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid value for {flag}: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  vida-cidada [--store <path|memory>] login --cpf <cpf> --password <senha>");
    eprintln!("  vida-cidada [--store <path|memory>] logout");
    eprintln!("  vida-cidada [--store <path|memory>] whoami");
    eprintln!("  vida-cidada [--store <path|memory>] open <route>");
    eprintln!("  vida-cidada [--store <path|memory>] quiz [--questions <file.json>]");
    eprintln!("  vida-cidada [--store <path|memory>] progress");
    eprintln!(
        "  vida-cidada [--store <path|memory>] book --date <AAAA-MM-DD> --vehicle <carro|moto> --time <HH:MM>"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store {}", config::DEFAULT_STORE_PATH);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VIDA_STORE_PATH, VIDA_QUESTIONS_PATH, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login { cpf: String, password: String },
    Logout,
    WhoAmI,
    Open { route: Route },
    Quiz { questions: Option<PathBuf> },
    Progress,
    Book {
        date: NaiveDate,
        vehicle: VehicleType,
        time: NaiveTime,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    store: Option<StoreLocation>,
    command: Command,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut store = None;

        let name = loop {
            match args.next() {
                None => return Ok(Self { store, command: Command::Help }),
                Some(arg) if arg == "--store" => {
                    store = Some(StoreLocation::parse(&require_value(&mut args, "--store")?));
                }
                Some(arg) if arg == "--help" || arg == "-h" => {
                    return Ok(Self { store, command: Command::Help });
                }
                Some(arg) => break arg,
            }
        };

        let command = match name.as_str() {
            "login" => Self::parse_login(&mut args)?,
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "open" => {
                let raw = args
                    .next()
                    .ok_or(ArgsError::MissingArgument { name: "route" })?;
                let route =
                    Route::from_path(&raw).ok_or(ArgsError::UnknownRoute { raw: raw.clone() })?;
                Command::Open { route }
            }
            "quiz" => Self::parse_quiz(&mut args)?,
            "progress" => Command::Progress,
            "book" => Self::parse_book(&mut args)?,
            _ => return Err(ArgsError::UnknownArg(name)),
        };

        if let Some(extra) = args.next() {
            return Err(ArgsError::UnknownArg(extra));
        }
        Ok(Self { store, command })
    }

    fn parse_login(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
        let mut cpf = None;
        let mut password = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cpf" => cpf = Some(require_value(args, "--cpf")?),
                "--password" => password = Some(require_value(args, "--password")?),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Command::Login {
            cpf: cpf.ok_or(ArgsError::MissingValue { flag: "--cpf" })?,
            password: password.ok_or(ArgsError::MissingValue { flag: "--password" })?,
        })
    }

    fn parse_quiz(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
        let mut questions = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    questions = Some(PathBuf::from(require_value(args, "--questions")?));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Command::Quiz { questions })
    }

    fn parse_book(args: &mut impl Iterator<Item = String>) -> Result<Command, ArgsError> {
        let mut date = None;
        let mut vehicle = None;
        let mut time = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--date" => {
                    let raw = require_value(args, "--date")?;
                    date = Some(
                        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                            .map_err(|_| ArgsError::InvalidValue { flag: "--date", raw })?,
                    );
                }
                "--vehicle" => {
                    let raw = require_value(args, "--vehicle")?;
                    vehicle = Some(
                        raw.parse()
                            .map_err(|_| ArgsError::InvalidValue { flag: "--vehicle", raw })?,
                    );
                }
                "--time" => {
                    let raw = require_value(args, "--time")?;
                    time = Some(
                        NaiveTime::parse_from_str(&raw, "%H:%M")
                            .map_err(|_| ArgsError::InvalidValue { flag: "--time", raw })?,
                    );
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Command::Book {
            date: date.ok_or(ArgsError::MissingValue { flag: "--date" })?,
            vehicle: vehicle.ok_or(ArgsError::MissingValue { flag: "--vehicle" })?,
            time: time.ok_or(ArgsError::MissingValue { flag: "--time" })?,
        })
    }
}

fn build_store(location: &StoreLocation) -> SessionStore {
    let backend: Arc<dyn KeyValueStore> = match location {
        StoreLocation::Memory => Arc::new(InMemoryStore::new()),
        StoreLocation::File(path) => Arc::new(JsonFileStore::new(path.clone())),
    };
    SessionStore::new(backend)
}

fn print_decision(route: Route, decision: Decision) {
    match decision {
        Decision::Allow => println!("{route}: acesso permitido"),
        Decision::Deny { redirect } => println!("{route}: redirecionando para {redirect}"),
    }
}

/// Opens `route` for the stored session, printing the redirect when refused.
fn enter(auth: &AuthService, route: Route) -> Result<bool, Box<dyn std::error::Error>> {
    let decision = auth.authorize(route)?;
    if !decision.is_allowed() {
        print_decision(route, decision);
    }
    Ok(decision.is_allowed())
}

fn print_progress() -> Result<(), Box<dyn std::error::Error>> {
    let modules = content::theory_modules()?;
    let progress = CourseProgress::of(&modules);
    println!(
        "Progresso geral: {:.0}% concluído, {:.0} horas restantes",
        progress.percentage, progress.hours_remaining
    );
    for module in &modules {
        let status = match module.start() {
            LessonStart::Review => "concluído",
            LessonStart::Resume => "em andamento",
            LessonStart::Begin => "não iniciado",
        };
        println!(
            "  {} ({}h): {}% - {status}",
            module.title(),
            module.hours(),
            module.progress()
        );
    }
    Ok(())
}

fn book(
    date: NaiveDate,
    vehicle: VehicleType,
    time: NaiveTime,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wizard = BookingWizard::new(content::simulator_slots()?);
    let today = chrono::Local::now().date_naive();

    wizard.select_date(date, today)?;
    println!("1. {}: {}", BookingStep::SelectDate.label(), date.format("%d/%m/%Y"));
    let slot = wizard.select_slot(vehicle, time)?;
    println!(
        "2. {}: {} - {} com {}",
        BookingStep::ChooseTime.label(),
        slot.time.format("%H:%M"),
        slot.simulator,
        slot.instructor
    );
    let booking = wizard.confirm()?;
    info!(date = %booking.date, time = %booking.slot.time, %vehicle, "simulator session booked");
    println!("3. {}: Aula agendada com sucesso!", BookingStep::Confirm.label());
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let location = args.store.unwrap_or(config.store);
    info!(?location, "session store selected");
    let auth = AuthService::with_demo_account(build_store(&location));

    match args.command {
        Command::Help => print_usage(),
        Command::Login { cpf, password } => {
            let credentials = Credentials::parse(&cpf, password)?;
            let session = auth.login(&credentials)?;
            println!("Login realizado com sucesso!");
            if let Some(name) = session.display_name() {
                println!("Olá, {name}!");
            }
        }
        Command::Logout => {
            auth.logout()?;
            println!("Sessão encerrada.");
        }
        Command::WhoAmI => {
            let session = auth.current_session()?;
            match (session.is_authenticated(), session.display_name()) {
                (true, Some(name)) => println!("Olá, {name}!"),
                (true, None) => println!("Sessão ativa."),
                (false, _) => println!("Nenhuma sessão ativa."),
            }
        }
        Command::Open { route } => print_decision(route, auth.authorize(route)?),
        Command::Progress => {
            if enter(&auth, Route::TheoreticalLessons)? {
                print_progress()?;
            }
        }
        Command::Book {
            date,
            vehicle,
            time,
        } => {
            if enter(&auth, Route::ScheduleSimulator)? {
                book(date, vehicle, time)?;
            }
        }
        Command::Quiz { questions } => {
            if !enter(&auth, Route::TheoreticalLessons)? {
                return Ok(());
            }

            let assessment = match questions.or(config.questions_path) {
                Some(path) => AssessmentService::new(Arc::new(JsonQuestionSource::new(path))),
                None => AssessmentService::builtin(),
            };
            let quiz = assessment.open()?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            if quiz_runner::run_quiz(&assessment, quiz, stdin.lock(), &mut stdout)?.is_none() {
                println!("Avaliação encerrada sem conclusão.");
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
