use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use transdesk_core::auth::Role;
use transdesk_core::message::RecipientType;
use transdesk_core::project::ProjectId;

#[derive(Parser, Debug)]
#[command(name = "transdesk")]
#[command(about = "Work with translation projects on a Transdesk portal", long_about = None)]
pub struct Cli {
    /// Portal root URL. Overrides `TRANSDESK_BASE_URL`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a project's original file.
    DownloadOriginal { id: ProjectId },

    /// Download a project's translated file.
    DownloadTranslation { id: ProjectId },

    /// Upload a translated file for a project.
    Upload {
        id: ProjectId,
        file: Option<PathBuf>,
    },

    /// Accept a delivered translation.
    Accept { id: ProjectId },

    /// Reject a delivered translation with feedback.
    Reject {
        id: ProjectId,
        #[arg(long, short, default_value = "")]
        feedback: String,
    },

    /// Close a project.
    Close { id: ProjectId },

    /// Create a new project.
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Target language code.
        #[arg(long, default_value = "")]
        language: String,
        /// Source document.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show a project's current state.
    Show { id: ProjectId },

    /// Log in and print the landing page for the account's role.
    Login {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Register a new account.
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Customer)]
        role: RoleArg,
        /// Languages you translate, separated by `,` `;` or newlines.
        #[arg(long, default_value = "")]
        languages: String,
    },

    /// Send a message about a project to its customer or translator.
    Message {
        project: String,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        translator: Option<String>,
        #[arg(long, value_enum, default_value_t = RecipientArg::Customer)]
        to: RecipientArg,
        /// Defaults to "Regarding your feedback".
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, default_value = "")]
        body: String,
    },

    /// Print interface labels in the configured language.
    Translate {
        /// Language code. Overrides `TRANSDESK_LANG`.
        #[arg(long)]
        lang: Option<String>,
        keys: Vec<String>,
    },
}

impl Command {
    /// Whether the command needs an authenticated session.
    pub fn needs_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Register { .. } | Command::Translate { .. }
        )
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    Customer,
    Translator,
    Administrator,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Customer => Role::Customer,
            RoleArg::Translator => Role::Translator,
            RoleArg::Administrator => Role::Administrator,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RecipientArg {
    Customer,
    Translator,
}

impl From<RecipientArg> for RecipientType {
    fn from(arg: RecipientArg) -> Self {
        match arg {
            RecipientArg::Customer => RecipientType::Customer,
            RecipientArg::Translator => RecipientType::Translator,
        }
    }
}
