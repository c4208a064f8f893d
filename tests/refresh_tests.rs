//! Refresh-cycle tests against a local fixture serving the four world files.
//!
//! The snapshot is process-global state, so the happy path and the failure
//! path run inside a single test body.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use grepolis_stats::stats::{self, fetch::WorldEndpoints};

fn gz(data: &str) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data.as_bytes()).expect("gzip write");
    enc.finish().expect("gzip finish")
}

/// Minimal HTTP/1.1 file server, one request per connection. Returns the
/// base URL of its data directory.
async fn spawn_fixture(files: HashMap<&'static str, Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fixture");
    let addr = listener.local_addr().expect("fixture addr");
    let files = Arc::new(files);

    tokio::spawn(async move {
        loop {
            let (mut sock, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let files = files.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match sock.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let text = String::from_utf8_lossy(&head);
                let path = text.split_whitespace().nth(1).unwrap_or("/").to_owned();

                let resp = match files.iter().find(|(name, _)| path.ends_with(*name)) {
                    Some((_, body)) => {
                        let mut r = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            body.len()
                        )
                        .into_bytes();
                        r.extend_from_slice(body);
                        r
                    }
                    None => {
                        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_vec()
                    }
                };
                let _ = sock.write_all(&resp).await;
                let _ = sock.shutdown().await;
            });
        }
    });

    format!("http://{addr}/data/")
}

#[tokio::test]
async fn refresh_swaps_snapshot_and_failure_keeps_it() {
    let mut files = HashMap::new();
    files.insert(
        "players.txt.gz",
        gz("1,Ana+Clara,77,1200,2,4\n2,Bruno,,1500,1,6\n"),
    );
    files.insert("player_kills_all.txt.gz", gz("1,2,800\n2,1,700\n"));
    files.insert("player_kills_att.txt.gz", gz("1,1,400\n"));
    files.insert("player_kills_def.txt.gz", gz("1,2,300\n"));

    let base = spawn_fixture(files).await;
    let eps = WorldEndpoints::new(&Url::parse(&base).expect("base url")).expect("endpoints");
    let client = reqwest::Client::new();

    // Happy path: the snapshot is replaced wholesale
    stats::refresh(&client, &eps).await.expect("refresh");

    let snap = stats::current();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap.players[0].name, "Bruno", "sorted by world rank");
    assert_eq!(snap.players[0].alliance_id, -1);
    assert_eq!(snap.players[0].combat_points, Some(800));
    assert_eq!(snap.players[0].attack_points, None);
    assert_eq!(snap.players[0].defense_points, Some(300));
    assert_eq!(snap.players[1].name, "Ana Clara", "name decoded");
    assert_eq!(snap.players[1].combat_points, Some(700));
    assert_eq!(snap.players[1].attack_points, Some(400));
    assert_eq!(snap.players[1].defense_points, None);
    let first_fetch = snap.fetched_at.expect("fetched_at set");

    // Failure path: an unreachable upstream leaves the snapshot alone
    let dead = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let dead_addr = dead.local_addr().expect("addr");
    drop(dead); // port is closed again
    let dead_eps =
        WorldEndpoints::new(&Url::parse(&format!("http://{dead_addr}/data/")).expect("dead url"))
            .expect("endpoints");

    stats::refresh(&client, &dead_eps)
        .await
        .expect_err("refresh against a closed port must fail");

    let snap = stats::current();
    assert_eq!(snap.len(), 2, "previous snapshot still served");
    assert_eq!(snap.fetched_at, Some(first_fetch));
}

#[tokio::test]
async fn empty_players_file_fails_the_cycle() {
    let mut files = HashMap::new();
    files.insert("players.txt.gz", gz(""));
    files.insert("player_kills_all.txt.gz", gz("1,1,1\n"));
    files.insert("player_kills_att.txt.gz", gz(""));
    files.insert("player_kills_def.txt.gz", gz(""));

    let base = spawn_fixture(files).await;
    let eps = WorldEndpoints::new(&Url::parse(&base).expect("base url")).expect("endpoints");

    let res = stats::fetch::fetch_world(&reqwest::Client::new(), &eps).await;
    assert!(res.is_err(), "zero players must not produce a snapshot");
}

#[tokio::test]
async fn missing_file_fails_the_cycle() {
    // players.txt.gz absent, fixture answers 404
    let mut files = HashMap::new();
    files.insert("player_kills_all.txt.gz", gz("1,1,1\n"));

    let base = spawn_fixture(files).await;
    let eps = WorldEndpoints::new(&Url::parse(&base).expect("base url")).expect("endpoints");

    let res = stats::fetch::fetch_world(&reqwest::Client::new(), &eps).await;
    assert!(res.is_err());
}
