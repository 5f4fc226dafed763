use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API (the default when no command is given)
    Serve {
        /// Override HOST
        #[arg(long)]
        host: Option<String>,
        /// Override PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the database tables and seed the admin user, then exit
    SetupDb,
}
