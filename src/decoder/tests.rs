use crate::{
    event::{
        AccelData, Band, BandMetric, BatteryStatus, ChannelStatus, DrlStatus, EegChannels,
        GyroData, MuseEvent,
    },
    osc::{OscArg, RawMessage},
};

use super::*;

fn open_router(prefix: &str) -> MessageRouter {
    let mut router = MessageRouter::new(prefix);
    router.open();
    router
}

fn floats(values: &[f64]) -> Vec<OscArg> {
    values.iter().copied().map(OscArg::Float).collect()
}

fn ints(values: &[i64]) -> Vec<OscArg> {
    values.iter().copied().map(OscArg::Int).collect()
}

/// Routes a message and returns only the decoded events.
fn derived(router: &mut MessageRouter, address: &str, args: Vec<OscArg>) -> Vec<MuseEvent> {
    router
        .route(RawMessage::new(address, args))
        .expect("message must be accepted")
        .into_iter()
        .filter(MuseEvent::is_derived)
        .collect()
}

#[test]
fn test_prefix_is_stripped_before_dispatch() {
    let mut router = open_router("/p");
    let args = floats(&[1.0, 2.0, 3.0, 4.0]);

    let events = router
        .route(RawMessage::new("/p/eeg", args.clone()))
        .unwrap();

    assert_eq!(
        events,
        vec![
            MuseEvent::Message(RawMessage::new("/p/eeg", args.clone())),
            MuseEvent::Route {
                address: "/eeg".to_string(),
                args,
            },
            MuseEvent::EegRaw(EegChannels::new(1.0, 2.0, 3.0, 4.0)),
        ]
    );
}

#[test]
fn test_prefix_mismatch_is_dropped() {
    let mut router = open_router("/p");

    assert!(router.route(RawMessage::new("/eeg", vec![])).is_none());
    assert!(router.route(RawMessage::new("/q/eeg", vec![])).is_none());
    assert!(router.route(RawMessage::new("/peeg", vec![])).is_none());
    assert!(router.route(RawMessage::new("/p", vec![])).is_none());
    assert!(!router.accepts("/q/eeg"));
    assert!(router.accepts("/p/eeg"));
}

#[test]
fn test_empty_prefix_passes_addresses_unchanged() {
    let router = open_router("");

    assert_eq!(router.routed_address("/acc"), Some("/acc"));
    assert_eq!(router.routed_address("acc"), None);
}

#[test]
fn test_closed_router_ignores_messages() {
    let mut router = MessageRouter::new("");
    assert!(router.route(RawMessage::new("/eeg", vec![])).is_none());
    assert!(!router.accepts("/eeg"));

    router.open();
    assert!(router.route(RawMessage::new("/eeg", vec![])).is_some());

    router.close();
    assert!(!router.is_open());
    assert!(router.route(RawMessage::new("/elements/blink", ints(&[1]))).is_none());
}

#[test]
fn test_unknown_address_only_produces_generic_events() {
    let mut router = open_router("");

    let events = router
        .route(RawMessage::new("/muse/unknown", ints(&[7])))
        .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name(), "message");
    assert_eq!(events[1].name(), "/muse/unknown");
}

#[test]
fn test_eeg_and_motion_bindings() {
    let mut router = open_router("");

    assert_eq!(
        derived(&mut router, "/notch_filtered_eeg", floats(&[5.0, 6.0, 7.0, 8.0])),
        vec![MuseEvent::EegFiltered(EegChannels::new(5.0, 6.0, 7.0, 8.0))]
    );
    assert_eq!(
        derived(&mut router, "/eeg/quantization", floats(&[0.5])),
        vec![MuseEvent::EegStepsize(Some(0.5))]
    );
    assert_eq!(
        derived(&mut router, "/acc", floats(&[0.1, 0.2, 0.9])),
        vec![MuseEvent::AccelData(AccelData {
            x: Some(0.1),
            y: Some(0.2),
            z: Some(0.9),
        })]
    );
    assert_eq!(
        derived(&mut router, "/gyro", floats(&[1.0, -2.0, 3.0])),
        vec![MuseEvent::GyroData(GyroData {
            roll_rate: Some(1.0),
            pitch_rate: Some(-2.0),
            yaw_rate: Some(3.0),
        })]
    );
}

#[test]
fn test_all_band_power_bindings() {
    let mut router = open_router("");

    for (band, metric) in Band::all_pairs() {
        let events = derived(&mut router, &band.address(metric), ints(&[1, 2, 3, 4]));

        assert_eq!(
            events,
            vec![MuseEvent::BandPower {
                band,
                metric,
                channels: EegChannels::new(1.0, 2.0, 3.0, 4.0),
            }]
        );
    }

    let events = derived(&mut router, "/elements/delta_absolute", ints(&[1, 2, 3, 4]));
    assert_eq!(events[0].name(), "delta abp");

    let events = derived(&mut router, "/elements/gamma_session_score", ints(&[1, 2, 3, 4]));
    assert_eq!(events[0].name(), "gamma score");
    assert!(matches!(
        events[0],
        MuseEvent::BandPower {
            band: Band::Gamma,
            metric: BandMetric::SessionScore,
            ..
        }
    ));
}

#[test]
fn test_battery_status() {
    let mut router = open_router("");

    let args = vec![OscArg::Int(5000), OscArg::Float(4.01), OscArg::Int(37)];

    assert_eq!(
        derived(&mut router, "/batt", args),
        vec![MuseEvent::BatteryStatus(BatteryStatus {
            percent: Some(0.5),
            voltage: Some(4.01),
            temperature: Some(37.0),
        })]
    );
}

#[test]
fn test_drl_and_channel_status() {
    let mut router = open_router("");

    assert_eq!(
        derived(&mut router, "/drlref", floats(&[1.5, 2.5])),
        vec![MuseEvent::DrlStatus(DrlStatus {
            drl: Some(1.5),
            reference: Some(2.5),
        })]
    );
    assert_eq!(
        derived(&mut router, "/elements/is_good", ints(&[1, 0, 2, 0])),
        vec![MuseEvent::ChannelStatus(ChannelStatus {
            left_ear: true,
            left_front: false,
            right_front: true,
            right_ear: false,
        })]
    );
}

#[test]
fn test_missing_arguments_decode_leniently() {
    let mut router = open_router("");

    assert_eq!(
        derived(&mut router, "/eeg", floats(&[1.0, 2.0])),
        vec![MuseEvent::EegRaw(EegChannels {
            tp9: Some(1.0),
            af7: Some(2.0),
            af8: None,
            tp10: None,
        })]
    );
    assert_eq!(
        derived(&mut router, "/batt", vec![]),
        vec![MuseEvent::BatteryStatus(BatteryStatus::default())]
    );
    assert_eq!(
        derived(&mut router, "/elements/is_good", ints(&[1])),
        vec![MuseEvent::ChannelStatus(ChannelStatus {
            left_ear: true,
            ..Default::default()
        })]
    );
    assert_eq!(
        derived(&mut router, "/elements/blink", vec![]),
        vec![MuseEvent::BlinkStatus(false)]
    );
}

#[test]
fn test_blink_is_edge_triggered() {
    let mut router = open_router("");

    let events: Vec<_> = [1, 1, 0, 1]
        .into_iter()
        .flat_map(|value| derived(&mut router, "/elements/blink", ints(&[value])))
        .collect();

    assert_eq!(
        events,
        vec![
            MuseEvent::BlinkStatus(true),
            MuseEvent::Blink,
            MuseEvent::BlinkStatus(true),
            MuseEvent::BlinkStatus(false),
            MuseEvent::BlinkStatus(true),
            MuseEvent::Blink,
        ]
    );
}

#[test]
fn test_jaw_clench_is_edge_triggered() {
    let mut router = open_router("");

    let events: Vec<_> = [0.0, 1.0, 0.5, 0.0]
        .into_iter()
        .flat_map(|value| derived(&mut router, "/elements/jaw_clench", floats(&[value])))
        .collect();

    assert_eq!(
        events,
        vec![
            MuseEvent::JawClenchStatus(false),
            MuseEvent::JawClenchStatus(true),
            MuseEvent::JawClench,
            MuseEvent::JawClenchStatus(true),
            MuseEvent::JawClenchStatus(false),
        ]
    );
}

#[test]
fn test_forehead_contact_made_and_lost() {
    let mut router = open_router("");

    let events: Vec<_> = [1, 1, 0, 0, 1]
        .into_iter()
        .flat_map(|value| {
            derived(&mut router, "/elements/touching_forehead", ints(&[value]))
        })
        .collect();

    assert_eq!(
        events,
        vec![
            MuseEvent::ContactStatus(true),
            MuseEvent::ContactMade,
            MuseEvent::ContactStatus(true),
            MuseEvent::ContactStatus(false),
            MuseEvent::ContactLost,
            MuseEvent::ContactStatus(false),
            MuseEvent::ContactStatus(true),
            MuseEvent::ContactMade,
        ]
    );
}

#[test]
fn test_edge_state_is_per_signal() {
    let mut router = open_router("");

    derived(&mut router, "/elements/blink", ints(&[1]));

    assert_eq!(
        derived(&mut router, "/elements/jaw_clench", ints(&[1])),
        vec![MuseEvent::JawClenchStatus(true), MuseEvent::JawClench]
    );
}
