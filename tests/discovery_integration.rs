// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the Model 550 discovery controller against a local
//! UDP responder.

use std::time::Duration;

use steamist_lib::protocol::{DiscoveryOptions, Scanner, UdpScanner};
use steamist_lib::{AnySteamist, Error, MODEL_550, Model550, Steamist, TempUnit};
use tokio::net::UdpSocket;

const REPLY: &[u8] = b"steamist-550\r\n00:04:A3:12:34:56\r\ntemperature=105\r\ntemp_unit=F\r\n\
                       minutesleft=3\r\nsecondsleft=45\r\nprofile=1\r\n";

/// Binds a responder that answers every probe with `reply`.
async fn spawn_responder(reply: &'static [u8]) -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();

    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        while let Ok((len, from)) = socket.recv_from(&mut buf).await {
            assert_eq!(&buf[..len], b"Discovery: Who is out there?");
            let _ = socket.send_to(reply, from).await;
        }
    });

    port
}

/// Returns a port with nothing answering on it.
async fn silent_port() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

fn options(port: u16) -> DiscoveryOptions {
    DiscoveryOptions::new()
        .with_port(port)
        .with_timeout(Duration::from_millis(500))
}

#[tokio::test]
async fn udp_scanner_collects_reply() {
    let port = spawn_responder(REPLY).await;
    let scanner = UdpScanner::new(options(port));

    let devices = scanner
        .scan("127.0.0.1", Duration::from_secs(2))
        .await
        .unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name(), "steamist-550");
    assert_eq!(devices[0].ipaddress(), "127.0.0.1");
}

#[tokio::test]
async fn udp_scanner_times_out_empty() {
    let (_socket, port) = silent_port().await;
    let scanner = UdpScanner::new(options(port));

    let devices = scanner
        .scan("127.0.0.1", Duration::from_millis(200))
        .await
        .unwrap();

    assert!(devices.is_empty());
}

#[tokio::test]
async fn model_550_reads_status() {
    let port = spawn_responder(REPLY).await;
    let steamist = Model550::with_options("127.0.0.1", options(port));

    let status = steamist.get_status().await.unwrap();

    assert_eq!(status.temp(), 105);
    assert_eq!(status.temp_units(), TempUnit::Fahrenheit);
    assert_eq!(status.minutes_remain(), 3);
    assert_eq!(status.seconds_remain(), 45);
    assert!(status.active());
}

#[tokio::test]
async fn model_550_silent_controller_is_not_found() {
    let (_socket, port) = silent_port().await;
    let steamist = Model550::with_options("127.0.0.1", options(port));

    let err = steamist.get_status().await.unwrap_err();

    assert!(matches!(err, Error::DeviceNotFound));
}

#[tokio::test]
async fn model_550_turn_off_masks_running_profile() {
    let port = spawn_responder(REPLY).await;
    let steamist = Model550::with_options("127.0.0.1", options(port));

    steamist.turn_off().await.unwrap();
    let status = steamist.get_status().await.unwrap();

    assert!(!status.active());
    assert_eq!(status.minutes_remain(), 3);
}

#[tokio::test]
async fn factory_selects_discovery_controller() {
    let steamist =
        AnySteamist::create("192.168.1.70", MODEL_550, || unreachable!("no HTTP session")).unwrap();

    assert!(matches!(steamist, AnySteamist::Model550(_)));
    assert_eq!(steamist.model(), MODEL_550);
}
