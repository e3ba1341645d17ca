use crate::error::ConfigError;
use crate::net::{AddressPlan, NodeId};
use crate::profile::{Profile, ProfileCatalog, ProfileKind};
use crate::sim::{SimTime, seeded_rng};
use crate::workload::{ProfileRouting, WorkloadAssigner, server_port};
use std::collections::HashSet;

#[test]
fn assignments_respect_address_and_port_consistency() {
    let catalog = ProfileCatalog::builtin().expect("catalog");
    let addresses = AddressPlan::for_topology(4, 200).expect("addresses");
    let routing = ProfileRouting::canonical();
    let assigner =
        WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 5.0).expect("assigner");

    let mut rng = seeded_rng(42);
    let mut seen = HashSet::new();
    for client in 0..200 {
        let (a, profile) = assigner.assign(client, &mut rng).expect("assign");
        assert_eq!(a.client, client);
        assert_eq!(a.node, NodeId(client));
        assert_eq!(Some(a.source), addresses.client(client));
        assert!(a.profile_index < 4);
        assert_eq!(a.profile, profile.kind);
        assert_eq!(a.profile.index(), a.profile_index);
        assert_eq!(a.destination, addresses.wired[a.profile_index + 1]);
        assert_eq!(a.port, 9000 + a.profile_index as u16);
        assert_eq!(a.server, a.profile_index);
        assert!(a.start <= SimTime::from_secs(5));
        seen.insert(a.profile);
    }
    // independent draws, but 200 of them cover every class
    assert_eq!(seen.len(), 4);
}

#[test]
fn assignment_draws_profile_then_start_time() {
    use rand::Rng;

    let catalog = ProfileCatalog::builtin().expect("catalog");
    let addresses = AddressPlan::for_topology(4, 1).expect("addresses");
    let routing = ProfileRouting::default();
    let assigner =
        WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 5.0).expect("assigner");

    let (a, _) = assigner.assign(0, &mut seeded_rng(9)).expect("assign");

    let mut replay = seeded_rng(9);
    let idx = replay.gen_range(0..4_usize);
    let start = replay.gen_range(0.0..=5.0_f64);
    assert_eq!(a.profile_index, idx);
    assert_eq!(a.start, SimTime::from_secs_f64(start));
}

#[test]
fn explicit_routing_overrides_creation_order() {
    let catalog = ProfileCatalog::builtin().expect("catalog");
    let addresses = AddressPlan::for_topology(4, 64).expect("addresses");
    let routing = ProfileRouting::canonical()
        .with_route(ProfileKind::Web, 0)
        .with_route(ProfileKind::Iot, 2);
    let assigner =
        WorkloadAssigner::new(&catalog, &addresses, &routing, 7000, 5.0).expect("assigner");

    let mut rng = seeded_rng(5);
    for client in 0..64 {
        let (a, _) = assigner.assign(client, &mut rng).expect("assign");
        let expected_server = match a.profile {
            ProfileKind::Web => 0,
            ProfileKind::Iot => 2,
            other => other.index(),
        };
        assert_eq!(a.server, expected_server);
        assert_eq!(Some(a.destination), addresses.server(expected_server));
        assert_eq!(a.port, 7000 + expected_server as u16);
    }
}

#[test]
fn assigner_rejects_too_few_servers() {
    let catalog = ProfileCatalog::builtin().expect("catalog");
    let addresses = AddressPlan::for_topology(3, 4).expect("addresses");
    let routing = ProfileRouting::canonical();
    let err = WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 5.0)
        .expect_err("voip has no server");
    assert_eq!(
        err,
        ConfigError::InsufficientServers {
            profile: ProfileKind::Voip,
            server: 3,
            n_servers: 3,
        }
    );

    // the same three servers suffice once VoIP is routed explicitly
    let routing = routing.with_route(ProfileKind::Voip, 1);
    assert!(WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 5.0).is_ok());

    let none = AddressPlan::for_topology(0, 4).expect("addresses");
    let err = WorkloadAssigner::new(&catalog, &none, &ProfileRouting::canonical(), 9000, 5.0)
        .expect_err("no servers");
    assert_eq!(err, ConfigError::NoServers);
}

#[test]
fn assigner_only_requires_routes_for_catalog_profiles() {
    let catalog = ProfileCatalog::new(vec![Profile::iot(), Profile::camera()]).expect("catalog");
    let addresses = AddressPlan::for_topology(2, 8).expect("addresses");
    let routing = ProfileRouting::canonical();
    let assigner =
        WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 5.0).expect("assigner");

    let mut rng = seeded_rng(1);
    for client in 0..8 {
        let (a, _) = assigner.assign(client, &mut rng).expect("assign");
        assert!(matches!(a.profile, ProfileKind::Iot | ProfileKind::Camera));
    }
}

#[test]
fn assigner_rejects_bad_start_window_ports_and_unknown_clients() {
    let catalog = ProfileCatalog::builtin().expect("catalog");
    let addresses = AddressPlan::for_topology(4, 2).expect("addresses");
    let routing = ProfileRouting::canonical();

    let err = WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, -1.0)
        .expect_err("negative window");
    assert_eq!(err, ConfigError::InvalidStartWindow(-1.0));

    let err = WorkloadAssigner::new(&catalog, &addresses, &routing, u16::MAX - 1, 5.0)
        .expect_err("port overflow");
    assert!(matches!(err, ConfigError::PortOverflow { .. }));

    let assigner =
        WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 0.0).expect("assigner");
    let mut rng = seeded_rng(0);
    let (a, _) = assigner.assign(1, &mut rng).expect("assign");
    assert_eq!(a.start, SimTime::ZERO);
    assert!(assigner.assign(2, &mut rng).is_err());
}

#[test]
fn server_port_offsets_from_base() {
    assert_eq!(server_port(9000, 0), Ok(9000));
    assert_eq!(server_port(9000, 3), Ok(9003));
    assert_eq!(
        server_port(u16::MAX, 1),
        Err(ConfigError::PortOverflow {
            port_base: u16::MAX,
            server: 1
        })
    );
    assert!(server_port(0, 70_000).is_err());
}

#[test]
fn profile_index_is_the_kind_index_for_any_catalog() {
    let catalog = ProfileCatalog::new(vec![Profile::camera(), Profile::voip()]).expect("catalog");
    let addresses = AddressPlan::for_topology(4, 32).expect("addresses");
    let routing = ProfileRouting::canonical();
    let assigner =
        WorkloadAssigner::new(&catalog, &addresses, &routing, 9000, 5.0).expect("assigner");

    let mut rng = seeded_rng(12);
    let mut seen = HashSet::new();
    for client in 0..32 {
        let (a, _) = assigner.assign(client, &mut rng).expect("assign");
        assert_eq!(a.profile_index, a.profile.index());
        assert_eq!(a.destination, addresses.wired[a.profile_index + 1]);
        assert_eq!(a.port, 9000 + a.profile_index as u16);
        seen.insert(a.profile_index);
    }
    assert!(seen.is_subset(&HashSet::from([1, 3])));
}

#[test]
fn assigner_reports_no_servers_for_an_empty_wired_plan() {
    let catalog = ProfileCatalog::builtin().expect("catalog");
    let empty = AddressPlan {
        wired: Vec::new(),
        clients: Vec::new(),
        ..AddressPlan::for_topology(4, 1).expect("addresses")
    };
    let err = WorkloadAssigner::new(&catalog, &empty, &ProfileRouting::canonical(), 9000, 5.0)
        .expect_err("empty wired plan");
    assert_eq!(err, ConfigError::NoServers);
}
