//! Client records.

use super::db::Db;
use crate::libs::records::Client;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_CLIENT: &str = "INSERT INTO clients (name) VALUES (?1)";
const SELECT_CLIENTS: &str = "SELECT id, name FROM clients ORDER BY name";
const SELECT_CLIENT_BY_ID: &str = "SELECT id, name FROM clients WHERE id = ?1";
const UPDATE_CLIENT: &str = "UPDATE clients SET name = ?2 WHERE id = ?1";
const DELETE_CLIENT: &str = "DELETE FROM clients WHERE id = ?1";
const CLIENT_IN_USE: &str = "SELECT EXISTS (SELECT 1 FROM projects WHERE client_id = ?1)";

pub struct Clients {
    conn: Connection,
}

impl Clients {
    pub fn new() -> Result<Clients> {
        Ok(Clients { conn: Db::new()?.conn })
    }

    pub fn insert(&mut self, name: &str) -> Result<Client> {
        self.conn.execute(INSERT_CLIENT, params![name])?;

        Ok(Client {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    pub fn fetch(&mut self) -> Result<Vec<Client>> {
        Ok(select_all(&self.conn)?)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Client>> {
        Ok(self.conn.query_row(SELECT_CLIENT_BY_ID, params![id], from_row).optional()?)
    }

    /// Returns the number of rows changed.
    pub fn update(&mut self, client: &Client) -> Result<usize> {
        Ok(self.conn.execute(UPDATE_CLIENT, params![client.id, client.name])?)
    }

    /// True while projects still reference the client.
    pub fn in_use(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(CLIENT_IN_USE, params![id], |row| row.get(0))?)
    }

    /// Fails on a foreign key violation unless [`Clients::in_use`] is false.
    pub fn delete(&mut self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_CLIENT, params![id])?)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn select_all(conn: &Connection) -> rusqlite::Result<Vec<Client>> {
    let mut stmt = conn.prepare(SELECT_CLIENTS)?;
    let clients = stmt.query_map([], from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(clients)
}
