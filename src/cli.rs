use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::NewHost;

#[derive(Debug, Parser)]
#[command(
    name = "sshcfg",
    version,
    about = "Manage host entries in your SSH client configuration file",
    arg_required_else_help = true
)]
pub struct Cli {
    /// SSH config file to manage [default: ~/.ssh/config]
    #[arg(long, short = 'f', global = true, env = "SSHCFG_FILE")]
    pub file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct HostArgs {
    /// Alias used on the `Host` line
    pub host: String,
    /// Address to connect to
    pub hostname: String,
    /// Login user [default: root]
    #[arg(long)]
    pub user: Option<String>,
    /// Port [default: 22]
    #[arg(long)]
    pub port: Option<String>,
    /// Private key to use
    #[arg(long)]
    pub identity_file: Option<String>,
}

impl From<HostArgs> for NewHost {
    fn from(args: HostArgs) -> Self {
        NewHost {
            host: args.host,
            hostname: args.hostname,
            user: args.user,
            port: args.port,
            identity_file: args.identity_file,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a host, failing if it already exists
    Add(HostArgs),
    /// Add a host, replacing any existing entry
    Modify(HostArgs),
    /// Remove a host
    #[command(visible_aliases = ["del", "remove", "rm"])]
    Delete { host: String },
    /// List hosts in file order
    List {
        /// Print hosts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every host
    Empty,
    /// Print hosts as `host,hostname,user,port` lines
    Export,
    /// Add (or replace) hosts from a file of `host,hostname,user,port` lines
    Import { file: PathBuf },
}
