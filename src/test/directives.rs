use crate::net::{AddressPlan, NodeId, Transport};
use crate::profile::{Profile, ProfileKind, TimingDist};
use crate::sim::{SimTime, seeded_rng};
use crate::topo::home::{HomeLayout, build_home_topology};
use crate::workload::{ClientAssignment, emit, sink_directives};
use std::net::Ipv4Addr;

fn assignment_for(kind: ProfileKind, start: SimTime) -> ClientAssignment {
    ClientAssignment {
        client: 0,
        node: NodeId(0),
        source: Ipv4Addr::new(10, 1, 1, 2),
        profile: kind,
        profile_index: kind.index(),
        start,
        server: kind.index(),
        destination: Ipv4Addr::new(192, 168, 1, 2 + kind.index() as u8),
        port: 9000 + kind.index() as u16,
    }
}

#[test]
fn fixed_mode_copies_nominal_parameters() {
    let mut rng = seeded_rng(1);
    let stop = SimTime::from_secs(20);
    for kind in ProfileKind::ALL {
        let profile = Profile::builtin(kind);
        let a = assignment_for(kind, SimTime::from_secs(1));
        let d = emit(&a, &profile, false, stop, &mut rng);
        assert_eq!(d.assignment, a);
        assert_eq!(d.transport, profile.transport);
        assert_eq!(d.packet_bytes, profile.packet_bytes);
        assert_eq!(d.rate_bps, profile.rate_bps);
        assert_eq!(d.on_time, profile.on_time);
        assert_eq!(d.off_time, profile.off_time);
        assert_eq!(d.start(), SimTime::from_secs(1));
        assert_eq!(d.stop, stop);
        assert!(!d.jittered);
    }
}

#[test]
fn fixed_mode_consumes_no_randomness() {
    use rand::Rng;

    let mut rng = seeded_rng(8);
    let a = assignment_for(ProfileKind::Camera, SimTime::ZERO);
    let _ = emit(&a, &Profile::camera(), false, SimTime::from_secs(5), &mut rng);
    let mut fresh = seeded_rng(8);
    assert_eq!(rng.gen_range(0..u64::MAX), fresh.gen_range(0..u64::MAX));
}

#[test]
fn variable_mode_stays_within_profile_ranges() {
    let mut rng = seeded_rng(42);
    let stop = SimTime::from_secs(60);
    for kind in ProfileKind::ALL {
        let profile = Profile::builtin(kind);
        let a = assignment_for(kind, SimTime::ZERO);
        for _ in 0..500 {
            let d = emit(&a, &profile, true, stop, &mut rng);
            assert!(d.jittered);
            match profile.packet_bytes_range {
                Some(r) => assert!(r.contains(d.packet_bytes), "{kind}: {}", d.packet_bytes),
                None => assert_eq!(d.packet_bytes, profile.packet_bytes),
            }
            match profile.rate_bps_range {
                Some(r) => assert!(r.contains(d.rate_bps), "{kind}: {}", d.rate_bps),
                None => assert_eq!(d.rate_bps, profile.rate_bps),
            }
            assert_eq!(d.on_time, profile.on_time_for(true));
        }
    }

    let iot = emit(
        &assignment_for(ProfileKind::Iot, SimTime::ZERO),
        &Profile::iot(),
        true,
        stop,
        &mut rng,
    );
    assert!((40..=80).contains(&iot.packet_bytes));
    assert_eq!(iot.rate_bps, 1_000);
}

#[test]
fn variable_mode_draws_size_before_rate() {
    let profile = Profile::camera();
    let a = assignment_for(ProfileKind::Camera, SimTime::ZERO);
    let d = emit(&a, &profile, true, SimTime::from_secs(5), &mut seeded_rng(77));

    let mut replay = seeded_rng(77);
    let size = profile.packet_bytes_range.map(|r| r.sample(&mut replay));
    let rate = profile.rate_bps_range.map(|r| r.sample(&mut replay));
    assert_eq!(Some(d.packet_bytes), size);
    assert_eq!(Some(d.rate_bps), rate);
}

#[test]
fn expected_rates_follow_duty_cycle() {
    let mut rng = seeded_rng(0);
    let stop = SimTime::from_secs(20);
    let iot = emit(
        &assignment_for(ProfileKind::Iot, SimTime::ZERO),
        &Profile::iot(),
        false,
        stop,
        &mut rng,
    );
    assert!((iot.expected_bps() - 1_000.0 * 0.1 / 10.1).abs() < 1e-9);

    let voip = emit(
        &assignment_for(ProfileKind::Voip, SimTime::from_secs(4)),
        &Profile::voip(),
        false,
        stop,
        &mut rng,
    );
    assert_eq!(voip.expected_bps(), 64_000.0);
    assert!((voip.expected_bytes() - 64_000.0 * 16.0 / 8.0).abs() < 1e-6);

    let late = emit(
        &assignment_for(ProfileKind::Voip, SimTime::from_secs(30)),
        &Profile::voip(),
        false,
        stop,
        &mut rng,
    );
    assert_eq!(late.expected_bytes(), 0.0);
}

#[test]
fn iot_bursts_open_with_the_off_period() {
    let mut rng = seeded_rng(0);
    let d = emit(
        &assignment_for(ProfileKind::Iot, SimTime::ZERO),
        &Profile::iot(),
        false,
        SimTime::from_secs(25),
        &mut rng,
    );
    let bursts = d.bursts(&mut rng).expect("bursts");
    assert_eq!(bursts.len(), 2);
    assert_eq!(bursts[0].start, SimTime::from_secs(10));
    assert!(bursts[0].end.0.abs_diff(10_100_000_000) < 10);
    assert!(bursts[1].start.0.abs_diff(20_100_000_000) < 10);
    assert!(bursts[1].end.0.abs_diff(20_200_000_000) < 10);
}

#[test]
fn always_on_bursts_tile_the_active_window() {
    let mut rng = seeded_rng(0);
    let d = emit(
        &assignment_for(ProfileKind::Camera, SimTime::from_millis(500)),
        &Profile::camera(),
        false,
        SimTime::from_secs(4),
        &mut rng,
    );
    let bursts = d.bursts(&mut rng).expect("bursts");
    assert_eq!(bursts.len(), 4);
    assert_eq!(bursts[0].start, SimTime::from_millis(500));
    for pair in bursts.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(bursts.last().map(|b| b.end), Some(SimTime::from_secs(4)));
}

#[test]
fn random_bursts_are_ordered_and_clipped() {
    let mut rng = seeded_rng(21);
    let stop = SimTime::from_secs(60);
    let d = emit(
        &assignment_for(ProfileKind::Web, SimTime::from_secs(2)),
        &Profile::web(),
        true,
        stop,
        &mut rng,
    );
    assert!(matches!(d.on_time, TimingDist::LogNormal { .. }));
    let bursts = d.bursts(&mut rng).expect("bursts");
    assert!(!bursts.is_empty());
    for b in &bursts {
        assert!(b.start >= SimTime::from_secs(2));
        assert!(b.start <= b.end);
        assert!(b.end <= stop);
    }
    for pair in bursts.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn sinks_cover_every_server_for_both_transports() {
    let topo = build_home_topology(3, 4, &HomeLayout::default());
    let addresses = AddressPlan::for_topology(4, 3).expect("addresses");
    let stop = SimTime::from_secs(20);
    let sinks = sink_directives(&topo, &addresses, 9000, stop).expect("sinks");

    assert_eq!(sinks.len(), 8);
    for k in 0..4 {
        let per_server = sinks.iter().filter(|s| s.server == k).collect::<Vec<_>>();
        assert_eq!(per_server.len(), 2);
        assert_eq!(
            per_server.iter().filter(|s| s.transport == Transport::Udp).count(),
            1
        );
        assert_eq!(
            per_server.iter().filter(|s| s.transport == Transport::Tcp).count(),
            1
        );
        for s in per_server {
            assert_eq!(s.port, 9000 + k as u16);
            assert_eq!(Some(s.address), addresses.server(k));
            assert_eq!(s.node, topo.servers[k].id);
            assert_eq!(s.start, SimTime::ZERO);
            assert_eq!(s.stop, stop);
        }
    }
}
