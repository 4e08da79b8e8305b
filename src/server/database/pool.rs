use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Error};
use log::error;
use tokio_postgres::{Client, NoTls};

/// FIFO pool of postgres clients.
///
/// Connections are handed out wrapped in a guard that returns them to the
/// pool on drop. When the pool runs dry a fresh connection is opened instead
/// of queueing the caller.
pub(crate) struct PgPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    conn_str: String,
    connections: Mutex<VecDeque<Client>>,
}

impl Clone for PgPool {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl PgPool {
    const DEFAULT_SIZE: usize = 10;

    /// Open a pool with the default number of connections.
    pub async fn connect(conn_str: &str) -> Result<Self, Error> {
        let mut connections = VecDeque::with_capacity(Self::DEFAULT_SIZE);
        for _ in 0..Self::DEFAULT_SIZE {
            connections.push_back(open(conn_str).await?);
        }
        Ok(Self {
            inner: Arc::new(PoolInner {
                conn_str: conn_str.to_string(),
                connections: Mutex::new(connections),
            }),
        })
    }

    /// Take a client from the pool, opening a new one when empty.
    pub async fn acquire(&self) -> Result<PooledConn, Error> {
        let pooled = self
            .inner
            .connections
            .lock()
            .expect("lock poisoned")
            .pop_front();
        let client = match pooled {
            Some(client) => client,
            None => open(&self.inner.conn_str).await?,
        };
        Ok(PooledConn {
            client: Some(client),
            pool: self.clone(),
        })
    }

    fn release(&self, client: Client) {
        self.inner
            .connections
            .lock()
            .expect("lock poisoned")
            .push_back(client);
    }
}

async fn open(conn_str: &str) -> Result<Client, Error> {
    let (client, conn) = tokio_postgres::connect(conn_str, NoTls)
        .await
        .context("failed to open a database connection")?;
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            error!("connection driver exited with error, {}", e);
        }
    });
    Ok(client)
}

/// A checked-out client; derefs to `tokio_postgres::Client`.
pub(crate) struct PooledConn {
    client: Option<Client>,
    pool: PgPool,
}

impl Deref for PooledConn {
    type Target = Client;

    fn deref(&self) -> &Client {
        self.client.as_ref().expect("client already returned")
    }
}

impl DerefMut for PooledConn {
    fn deref_mut(&mut self) -> &mut Client {
        self.client.as_mut().expect("client already returned")
    }
}

impl Drop for PooledConn {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            self.pool.release(client);
        }
    }
}
