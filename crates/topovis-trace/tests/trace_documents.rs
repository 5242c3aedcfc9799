use std::io::Cursor;

use topovis_trace::{TraceError, parse_reader, parse_str};

fn network(name: &str, hosts: &str) -> String {
    format!("<network><networkname>{name}</networkname><hosts>{hosts}</hosts></network>")
}

fn host(address: &str, hops: &[&str]) -> String {
    let hops: String = hops
        .iter()
        .map(|hop| format!("<hop><address>{hop}</address></hop>"))
        .collect();
    format!("<host><address>{address}</address><trace>{hops}</trace></host>")
}

#[test]
fn test_every_network_becomes_a_topology() {
    let source = format!(
        "<networks>{}{}</networks>",
        network("Office", &host("192.168.1.10", &["10.0.0.1"])),
        network("Plant", &host("172.16.0.5", &["10.0.0.1", "172.16.0.1"])),
    );

    let topologies = parse_str(&source).unwrap();

    let names: Vec<&str> = topologies.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["Office", "Plant"]);
    assert_eq!(topologies[1].edges().len(), 3);
    assert!(topologies.iter().all(|t| t.root().is_public_root()));
}

#[test]
fn test_shared_hops_repeat_edges() {
    let hosts = host("10.1.0.2", &["10.0.0.1"]) + &host("10.1.0.3", &["10.0.0.1"]);
    let source = format!("<networks>{}</networks>", network("Lab", &hosts));

    let topologies = parse_str(&source).unwrap();

    // PUBLIC-10.0.0.1 appears once per host; the graph model merges duplicates
    let public_edges = topologies[0]
        .edges()
        .iter()
        .filter(|(a, _)| a.is_public_root())
        .count();
    assert_eq!(public_edges, 2);
    assert_eq!(topologies[0].labels().len(), 4);
}

#[test]
fn test_parse_reader() {
    let source = format!("<networks>{}</networks>", network("Lab", &host("10.1.0.2", &[])));

    let topologies = parse_reader(Cursor::new(source.into_bytes())).unwrap();

    assert_eq!(topologies.len(), 1);
    assert_eq!(topologies[0].edges().len(), 1);
}

#[test]
fn test_invalid_utf8_is_io_error() {
    let err = parse_reader(Cursor::new(vec![0xff, 0xfe, 0x00])).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}

#[test]
fn test_error_location_is_reported() {
    let err = parse_str("<networks>\n<network></networks>").unwrap_err();
    let location = err.location().unwrap();
    assert_eq!(location.row, 2);
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_chain_length_is_hops_plus_one(hop_count in 0usize..12) {
            let hops: Vec<String> = (0..hop_count).map(|i| format!("10.0.{i}.1")).collect();
            let hop_refs: Vec<&str> = hops.iter().map(String::as_str).collect();
            let source = format!(
                "<networks>{}</networks>",
                network("N", &host("192.168.0.1", &hop_refs))
            );

            let topologies = parse_str(&source).unwrap();

            prop_assert_eq!(topologies[0].edges().len(), hop_count + 1);
            prop_assert_eq!(topologies[0].labels().len(), hop_count + 2);
        }
    }
}
