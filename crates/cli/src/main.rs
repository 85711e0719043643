//! `transdesk` -- command-line client for a Transdesk translation portal.
//!
//! Runs one portal action per invocation (download, upload, accept,
//! reject, close, create, ...) and reports the outcome as an alert line.
//! The process exits non-zero when the outcome is a warning or error.
//!
//! Configuration comes from the environment (and `.env`), see
//! [`config::CliConfig::from_env`]. When `TRANSDESK_USER` and
//! `TRANSDESK_PASSWORD` are set, the client logs in before any command
//! that needs a session.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transdesk_client::actions::{ActionSettings, ProjectActions};
use transdesk_client::api::PortalApi;
use transdesk_client::i18n::LanguageLoader;
use transdesk_client::message::MessageComposer;
use transdesk_client::session::SessionActions;
use transdesk_core::alert::{Alert, AlertSink};
use transdesk_core::attachment::Attachment;
use transdesk_core::auth::{parse_languages, LoginForm, RegistrationForm};
use transdesk_core::project::{ProjectForm, UploadForm};

mod cli;
mod config;
mod terminal;

use cli::{Cli, Command};
use config::CliConfig;
use terminal::{describe, PortalReloader, TerminalAlerts};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transdesk_cli=info,transdesk_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    tracing::debug!(base_url = %config.base_url, download_dir = %config.download_dir.display(), "Configuration loaded");

    let api = PortalApi::new(&config.base_url, config.connect_timeout)?;
    let alerts: Arc<dyn AlertSink> = Arc::new(TerminalAlerts);

    if cli.command.needs_session() {
        if let Some(credentials) = &config.credentials {
            let session = SessionActions::new(api.clone(), alerts.clone());
            let form = LoginForm {
                name: credentials.name.clone(),
                password: credentials.password.clone(),
            };
            if session.resume(&form).await.is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(run(cli.command, &config, api, alerts).await)
}

/// Dispatch one command and map its outcome to an exit code.
async fn run(command: Command, config: &CliConfig, api: PortalApi, alerts: Arc<dyn AlertSink>) -> ExitCode {
    let actions = ProjectActions::new(
        api.clone(),
        alerts.clone(),
        Arc::new(PortalReloader::new(api.clone())),
        ActionSettings {
            reload_delay: config.reload_delay,
            download_dir: config.download_dir.clone(),
        },
    );

    match command {
        Command::DownloadOriginal { id } => saved(actions.download_original(id).await),
        Command::DownloadTranslation { id } => saved(actions.download_translation(id).await),

        Command::Upload { id, file } => {
            let file = match open_attachment(file, alerts.as_ref()).await {
                Ok(file) => file,
                Err(code) => return code,
            };
            exit_code(&actions.upload_translated_file(id, UploadForm { file }).await)
        }

        Command::Accept { id } => exit_code(&actions.accept_project(id).await),
        Command::Reject { id, feedback } => exit_code(&actions.reject_project(id, &feedback).await),
        Command::Close { id } => exit_code(&actions.close_project(id).await),

        Command::Create {
            name,
            description,
            language,
            file,
        } => {
            let source_file = match open_attachment(file, alerts.as_ref()).await {
                Ok(file) => file,
                Err(code) => return code,
            };
            let form = ProjectForm {
                name,
                description,
                language,
                source_file,
            };
            exit_code(&actions.create_project(form).await)
        }

        Command::Show { id } => match api.get_project(id).await {
            Ok(project) => {
                println!("{}", describe(&project));
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::warn!(project_id = %id, error = %e, "Could not load project");
                let alert = Alert::error(e.server_error().unwrap_or("Failed to load project."));
                alerts.show_alert(alert);
                ExitCode::FAILURE
            }
        },

        Command::Login { name, password } => {
            let stored = config.credentials.as_ref();
            let form = LoginForm {
                name: name
                    .or_else(|| stored.map(|c| c.name.clone()))
                    .unwrap_or_default(),
                password: password
                    .or_else(|| stored.map(|c| c.password.clone()))
                    .unwrap_or_default(),
            };
            match SessionActions::new(api, alerts).login(&form).await {
                Ok(role) => {
                    println!("{}", role.landing_path());
                    ExitCode::SUCCESS
                }
                Err(_) => ExitCode::FAILURE,
            }
        }

        Command::Register {
            name,
            email,
            password,
            role,
            languages,
        } => {
            let form = RegistrationForm {
                name,
                email,
                password,
                role: role.into(),
                languages: parse_languages(&languages),
            };
            match SessionActions::new(api, alerts).register(form).await {
                Ok(next) => {
                    println!("{next}");
                    ExitCode::SUCCESS
                }
                Err(_) => ExitCode::FAILURE,
            }
        }

        Command::Message {
            project,
            customer,
            translator,
            to,
            subject,
            body,
        } => {
            let composer = MessageComposer::new(api, alerts);
            composer.open(Some(project.as_str()), customer.as_deref(), translator.as_deref());
            composer.edit(|draft| {
                draft.recipient_type = to.into();
                if let Some(subject) = subject {
                    draft.subject = subject;
                }
                draft.body = body;
            });
            match composer.send().await {
                Some(alert) => exit_code(&alert),
                None => ExitCode::FAILURE,
            }
        }

        Command::Translate { lang, keys } => {
            let lang = lang.unwrap_or_else(|| config.language.clone());
            let table = LanguageLoader::new(api).load(&lang).await.unwrap_or_default();
            for (key, text) in table.apply(&keys) {
                println!("{key}\t{text}");
            }
            ExitCode::SUCCESS
        }
    }
}

/// Open an optional file argument. A path that cannot be opened is
/// reported as an alert and ends the command.
async fn open_attachment(
    path: Option<PathBuf>,
    alerts: &dyn AlertSink,
) -> Result<Option<Attachment>, ExitCode> {
    let Some(path) = path else {
        return Ok(None);
    };
    match Attachment::open(&path).await {
        Ok(file) => Ok(Some(file)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not open file");
            alerts.show_alert(e.to_alert());
            Err(ExitCode::FAILURE)
        }
    }
}

fn saved(result: Result<PathBuf, Alert>) -> ExitCode {
    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn exit_code(alert: &Alert) -> ExitCode {
    if alert.kind.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
