//! Command-line and environment configuration for the server binary.

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

use crate::store::{StoreError, TodoStore};

/// Server settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", version, about = "Todo list REST service")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served for every non-API path.
    #[arg(long, env = "ASSETS_DIR", default_value = "./assets")]
    pub assets_dir: PathBuf,

    /// JSON snapshot backing the todo collection. Todos are kept in memory
    /// only when unset.
    #[arg(long, env = "TODO_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub async fn open_store(&self) -> Result<TodoStore, StoreError> {
        match &self.data_file {
            Some(path) => TodoStore::open(path).await,
            None => {
                tracing::warn!("no data file configured; todos will not survive a restart");
                Ok(TodoStore::in_memory())
            }
        }
    }
}
