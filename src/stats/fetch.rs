//! Download and parse the Grepolis world data files.
//!
//! Each file is a gzipped, header-less CSV served from
//! `http://{world}.grepolis.com/data/`. The upstream regenerates them on the
//! hour; rows that fail to parse are skipped so a few malformed lines cannot
//! sink a whole refresh cycle.

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::stats::table::PlayerTable;

/// One row of `players.txt`. `alliance_id` is empty for players without an
/// alliance; `name` arrives URL-encoded with `+` for spaces.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub alliance_id: Option<i64>,
    pub points: i64,
    pub rank: i64,
    pub towns: i64,
}

/// One row of the three `player_kills_*.txt` files.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct KillsRow {
    pub rank: i64,
    pub player_id: i64,
    pub points: i64,
}

/// The four per-world data endpoints.
#[derive(Debug, Clone)]
pub struct WorldEndpoints {
    pub players: Url,
    pub kills_all: Url,
    pub kills_att: Url,
    pub kills_def: Url,
}

impl WorldEndpoints {
    /// Endpoints under a data directory URL (must end in `/`).
    pub fn new(base: &Url) -> Result<Self> {
        Ok(Self {
            players: base.join("players.txt.gz")?,
            kills_all: base.join("player_kills_all.txt.gz")?,
            kills_att: base.join("player_kills_att.txt.gz")?,
            kills_def: base.join("player_kills_def.txt.gz")?,
        })
    }

    pub fn for_world(world: &str) -> Result<Self> {
        let base = Url::parse(&format!("http://{world}.grepolis.com/data/"))
            .context("building world data URL")?;
        Self::new(&base)
    }
}

/// Fetch all four files and merge them into one table.
pub async fn fetch_world(client: &reqwest::Client, eps: &WorldEndpoints) -> Result<PlayerTable> {
    let players = parse_players(&fetch_gz(client, &eps.players).await?);
    anyhow::ensure!(!players.is_empty(), "players file parsed to zero rows");

    let combat = parse_kills(&fetch_gz(client, &eps.kills_all).await?, "combat");
    let attack = parse_kills(&fetch_gz(client, &eps.kills_att).await?, "attack");
    let defense = parse_kills(&fetch_gz(client, &eps.kills_def).await?, "defense");

    Ok(PlayerTable::merge(players, combat, attack, defense))
}

async fn fetch_gz(client: &reqwest::Client, url: &Url) -> Result<Vec<u8>> {
    let body = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("bad status from {url}"))?
        .bytes()
        .await
        .with_context(|| format!("reading body of {url}"))?;

    let mut decoded = Vec::new();
    GzDecoder::new(&body[..])
        .read_to_end(&mut decoded)
        .with_context(|| format!("decompressing {url}"))?;
    Ok(decoded)
}

pub fn parse_players(bytes: &[u8]) -> Vec<PlayerRow> {
    let mut rows: Vec<PlayerRow> = parse_rows(bytes, "players");
    for row in &mut rows {
        row.name = decode_name(&row.name);
    }
    rows
}

pub fn parse_kills(bytes: &[u8], what: &str) -> Vec<KillsRow> {
    parse_rows(bytes, what)
}

fn parse_rows<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Vec<T> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for rec in rdr.deserialize::<T>() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("skipping malformed {what} row: {e}"),
        }
    }
    rows
}

/// Player names come URL-encoded with `+` for spaces.
fn decode_name(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
