//! Merged player table and its HTML rendering.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::stats::fetch::{KillsRow, PlayerRow};

const COLUMNS: [&str; 12] = [
    "id",
    "name",
    "alliance_id",
    "points",
    "rank",
    "towns",
    "combat_rank",
    "combat_points",
    "attack_rank",
    "attack_points",
    "defense_rank",
    "defense_points",
];

/// One player with the kill statistics joined on. Kill columns stay `None`
/// for players absent from the corresponding file.
#[derive(Debug, Clone)]
pub struct PlayerRecord {
    pub id: i64,
    pub name: String,
    /// `-1` when the player is not in an alliance.
    pub alliance_id: i64,
    pub points: i64,
    pub rank: i64,
    pub towns: i64,
    pub combat_rank: Option<i64>,
    pub combat_points: Option<i64>,
    pub attack_rank: Option<i64>,
    pub attack_points: Option<i64>,
    pub defense_rank: Option<i64>,
    pub defense_points: Option<i64>,
}

/// Immutable snapshot produced by one refresh cycle.
#[derive(Debug, Clone)]
pub struct PlayerTable {
    pub players: Vec<PlayerRecord>,
    /// `None` until the first successful refresh.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl PlayerTable {
    pub fn empty() -> Self {
        Self {
            players: Vec::new(),
            fetched_at: None,
        }
    }

    /// Left-join the kill tables onto the player list and sort by rank.
    pub fn merge(
        players: Vec<PlayerRow>,
        combat: Vec<KillsRow>,
        attack: Vec<KillsRow>,
        defense: Vec<KillsRow>,
    ) -> Self {
        let combat = by_player(&combat);
        let attack = by_player(&attack);
        let defense = by_player(&defense);

        let mut records: Vec<PlayerRecord> = players
            .into_iter()
            .map(|p| {
                let c = combat.get(&p.id);
                let a = attack.get(&p.id);
                let d = defense.get(&p.id);
                PlayerRecord {
                    id: p.id,
                    name: p.name,
                    alliance_id: p.alliance_id.unwrap_or(-1),
                    points: p.points,
                    rank: p.rank,
                    towns: p.towns,
                    combat_rank: c.map(|k| k.rank),
                    combat_points: c.map(|k| k.points),
                    attack_rank: a.map(|k| k.rank),
                    attack_points: a.map(|k| k.points),
                    defense_rank: d.map(|k| k.rank),
                    defense_points: d.map(|k| k.points),
                }
            })
            .collect();
        records.sort_by_key(|r| r.rank);

        Self {
            players: records,
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Render the snapshot as the full HTML document served by the query
    /// endpoint.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(512 + self.players.len() * 256);
        html.push_str("<html>\n<head><title>Grepolis Player Data</title></head>\n<body>\n");
        html.push_str("<h1>Grepolis Data</h1>\n");

        match self.fetched_at {
            Some(ts) => html.push_str(&format!(
                "<p>{} players, refreshed {}</p>\n",
                self.players.len(),
                ts.format("%Y-%m-%d %H:%M:%S UTC"),
            )),
            None => html.push_str("<p>No data fetched yet</p>\n"),
        }

        html.push_str("<table border=\"1\">\n<thead>\n<tr>");
        for col in COLUMNS {
            html.push_str(&format!("<th>{col}</th>"));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for p in &self.players {
            html.push_str("<tr>");
            html.push_str(&format!("<td>{}</td>", p.id));
            html.push_str(&format!("<td>{}</td>", escape(&p.name)));
            html.push_str(&format!("<td>{}</td>", p.alliance_id));
            html.push_str(&format!("<td>{}</td>", p.points));
            html.push_str(&format!("<td>{}</td>", p.rank));
            html.push_str(&format!("<td>{}</td>", p.towns));
            for cell in [
                p.combat_rank,
                p.combat_points,
                p.attack_rank,
                p.attack_points,
                p.defense_rank,
                p.defense_points,
            ] {
                match cell {
                    Some(n) => html.push_str(&format!("<td>{n}</td>")),
                    None => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
        html
    }
}

fn by_player(rows: &[KillsRow]) -> HashMap<i64, KillsRow> {
    rows.iter().map(|k| (k.player_id, *k)).collect()
}

/// Minimal HTML escaping for player names.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
