#![cfg(feature = "sync")]

use std::time::Duration;

use basp_routing::{Communication, NodeId, SyncRoutingTable};
use tokio::sync::mpsc;

mod common;
#[allow(unused_imports)]
use crate::common::{conn, enable_tracing, node};

// Connection lifecycle events as a transport layer would report them.
#[derive(Debug)]
enum Event {
    Connected(i64, NodeId),
    Handshaked(NodeId),
    Introduced(i64, NodeId),
    Disconnected(i64),
}

#[tokio::test]
async fn broker_event_loop() {
    enable_tracing();

    const PEERS: u32 = 8;

    let rt = SyncRoutingTable::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // One task per connection, reporting to a single broker loop.
    let mut handles = vec![];
    for peer in 1..=PEERS {
        let tx = tx.clone();
        handles.push(tokio::spawn(async move {
            let hdl = i64::from(peer);
            tx.send(Event::Connected(hdl, node(peer))).unwrap();
            tokio::time::sleep(Duration::from_millis(u64::from(peer))).await;
            tx.send(Event::Handshaked(node(peer))).unwrap();
            tx.send(Event::Introduced(hdl, node(peer * 100))).unwrap();

            // Every other connection drops.
            if peer % 2 == 0 {
                tx.send(Event::Disconnected(hdl)).unwrap();
            }
        }));
    }
    drop(tx);

    let broker = {
        let rt = rt.clone();
        tokio::spawn(async move {
            let mut lost = vec![];
            while let Some(event) = rx.recv().await {
                match event {
                    Event::Connected(hdl, nid) => rt.add(conn(hdl), nid),
                    Event::Handshaked(nid) => {
                        assert!(rt.set_status(&nid, Communication::Established));
                    }
                    Event::Introduced(hdl, nid) => {
                        assert!(rt.set_forwarder(&nid, conn(hdl)));
                    }
                    Event::Disconnected(hdl) => lost.push(rt.erase(&conn(hdl))),
                }
            }

            lost
        })
    };

    for handle in handles {
        handle.await.unwrap();
    }
    let lost = broker.await.unwrap();

    // Each dropped connection takes its peer and the node it introduced with it, in that order.
    assert_eq!(lost.len(), (PEERS / 2) as usize);
    for nodes in &lost {
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].process_id(), nodes[0].process_id() * 100);
    }

    for peer in 1..=PEERS {
        let reachable = peer % 2 == 1;
        assert_eq!(rt.reachable(&node(peer)), reachable);
        assert_eq!(rt.reachable(&node(peer * 100)), reachable);
    }
    assert_eq!(rt.num_direct(), (PEERS / 2) as usize);
    assert_eq!(rt.num_known(), PEERS as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_alongside_writer() {
    let rt = SyncRoutingTable::new();
    let nid = node(1);

    let writer = {
        let rt = rt.clone();
        tokio::spawn(async move {
            for i in 0..1000 {
                rt.add(conn(i), nid);
                tokio::task::yield_now().await;
            }
        })
    };

    let reader = {
        let rt = rt.clone();
        tokio::spawn(async move {
            for _ in 0..1000 {
                // Both directions are read under one lock, so they must agree.
                rt.with_table(|table| {
                    if let Some(hdl) = table.lookup_handle(&nid) {
                        assert_eq!(table.lookup_node(&hdl), Some(nid));
                        assert_eq!(table.num_direct(), 1);
                    }
                });
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    assert_eq!(rt.direct_routes(), vec![(conn(999), nid)]);
}
