mod common;

use core::time::Duration;

use common::{Call, LinkBehavior, Sim, block_on};
use wifi_scan::{
    BringUpConfig, Error, LinkStatus, LinkVerifier, PowerControl, PowerSequencer, RadioState,
    Readiness, StackGuard,
};

fn guard(
    sim: Sim,
) -> (
    StackGuard<common::SimPower, common::SimDelay, common::SimTransport, common::SimHosted>,
    common::Trace,
) {
    let trace = sim.trace.clone();
    let guard = StackGuard::new(
        PowerSequencer::new(sim.power, sim.delay, BringUpConfig::default()),
        LinkVerifier::new(sim.transport),
        sim.hosted,
    );
    (guard, trace)
}

#[test]
fn first_call_brings_up_second_is_a_no_op() {
    let (mut guard, trace) = guard(Sim::new());

    assert_eq!(block_on(guard.ensure_initialized()), Ok(Readiness::NewlyReady));
    assert!(guard.is_initialized());
    let after_first = trace.calls().len();
    assert!(trace.count(|c| *c == Call::HostedInit) == 1);

    assert_eq!(block_on(guard.ensure_initialized()), Ok(Readiness::AlreadyReady));
    assert_eq!(trace.calls().len(), after_first);
}

#[test]
fn bring_up_runs_power_link_then_stack() {
    let (mut guard, trace) = guard(Sim::new());
    block_on(guard.ensure_initialized()).unwrap();

    assert_eq!(
        trace.calls(),
        vec![
            Call::Power(RadioState::Off),
            Call::Delay(50_000_000),
            Call::Power(RadioState::ApplicationMode),
            Call::Delay(1_000_000_000),
            Call::Open,
            Call::Probe,
            Call::HostedInit,
        ]
    );
}

#[test]
fn off_is_held_for_the_settle_time_before_power_on() {
    let (mut guard, trace) = guard(Sim::new());
    block_on(guard.ensure_initialized()).unwrap();

    let timed = trace.timed_calls();
    let off_at = timed
        .iter()
        .find(|(_, c)| *c == Call::Power(RadioState::Off))
        .map(|(t, _)| *t)
        .unwrap();
    let on_at = timed
        .iter()
        .find(|(_, c)| *c == Call::Power(RadioState::ApplicationMode))
        .map(|(t, _)| *t)
        .unwrap();
    assert!(off_at < on_at);
    assert!(on_at - off_at >= 50_000_000);

    let probe_at = timed
        .iter()
        .find(|(_, c)| *c == Call::Probe)
        .map(|(t, _)| *t)
        .unwrap();
    assert!(probe_at - on_at >= 1_000_000_000);
}

#[test]
fn custom_settle_times_are_honored() {
    let sim = Sim::new();
    let trace = sim.trace.clone();
    let config = BringUpConfig::default()
        .with_off_settle(Duration::from_millis(200))
        .with_boot_settle(Duration::from_millis(1500));
    let mut power = PowerSequencer::new(sim.power, sim.delay, config);

    block_on(power.bring_up()).unwrap();

    assert_eq!(
        trace.calls(),
        vec![
            Call::Power(RadioState::Off),
            Call::Delay(200_000_000),
            Call::Power(RadioState::ApplicationMode),
            Call::Delay(1_500_000_000),
        ]
    );
    assert_eq!(power.config(), &config);
}

#[test]
fn released_power_line_is_still_usable() {
    let sim = Sim::new();
    let trace = sim.trace.clone();
    let power = PowerSequencer::new(sim.power, sim.delay, BringUpConfig::default());

    let (mut line, _delay) = power.release();
    block_on(line.set(RadioState::Off)).unwrap();

    assert_eq!(trace.calls(), vec![Call::Power(RadioState::Off)]);
}

#[test]
fn module_not_ready_leaves_latch_unset() {
    let (mut guard, trace) = guard(Sim::new().with_link(&[LinkBehavior::NotReady]));

    assert_eq!(block_on(guard.ensure_initialized()), Err(Error::InvalidState));
    assert!(!guard.is_initialized());
    assert_eq!(trace.count(|c| *c == Call::HostedInit), 0);
}

#[test]
fn failed_attempt_can_be_retried_from_off() {
    let (mut guard, trace) = guard(
        Sim::new().with_link(&[LinkBehavior::NotReady, LinkBehavior::Ready]),
    );

    assert_eq!(block_on(guard.ensure_initialized()), Err(Error::InvalidState));
    trace.clear();

    assert_eq!(block_on(guard.ensure_initialized()), Ok(Readiness::NewlyReady));
    assert_eq!(trace.calls()[0], Call::Power(RadioState::Off));
    assert!(guard.is_initialized());
    // The stack runs over the handle opened by the successful attempt.
    assert_eq!(guard.hosted().initialized_with, Some(2));
}

#[test]
fn transport_open_failure_aborts_bring_up() {
    let (mut guard, trace) = guard(Sim::new().with_link(&[LinkBehavior::OpenFails]));

    assert_eq!(block_on(guard.ensure_initialized()), Err(Error::Transport));
    assert!(!guard.is_initialized());
    assert_eq!(trace.count(|c| *c == Call::Probe), 0);
    assert_eq!(trace.count(|c| *c == Call::HostedInit), 0);
}

#[test]
fn probe_failure_is_a_transport_error() {
    let (mut guard, _) = guard(Sim::new().with_link(&[LinkBehavior::ProbeFails]));

    assert_eq!(block_on(guard.ensure_initialized()), Err(Error::Transport));
    assert!(!guard.is_initialized());
}

#[test]
fn power_failure_stops_the_sequence() {
    let mut sim = Sim::new();
    sim.power.fail_on = Some(RadioState::ApplicationMode);
    let (mut guard, trace) = guard(sim);

    assert_eq!(block_on(guard.ensure_initialized()), Err(Error::PowerControl));
    assert_eq!(trace.count(|c| *c == Call::Open), 0);
    assert!(!guard.is_initialized());
}

#[test]
fn hosted_stack_failure_leaves_latch_unset() {
    let mut sim = Sim::new();
    sim.hosted.fail = true;
    let (mut guard, _) = guard(sim);

    assert_eq!(block_on(guard.ensure_initialized()), Err(Error::StackInit));
    assert!(!guard.is_initialized());
    assert!(!guard.latch().is_set());
}

#[test]
fn link_verifier_keeps_handle_when_not_ready() {
    let sim = Sim::new().with_link(&[LinkBehavior::NotReady]);
    let mut link = LinkVerifier::new(sim.transport);

    assert_eq!(block_on(link.verify_link()), Ok(LinkStatus::NotReady));
    assert!(link.handle_mut().is_some());
}

#[test]
fn independent_guards_do_not_share_state() {
    let (mut first, _) = guard(Sim::new());
    let (second, second_trace) = guard(Sim::new());

    block_on(first.ensure_initialized()).unwrap();

    assert!(first.is_initialized());
    assert!(!second.is_initialized());
    assert!(second_trace.calls().is_empty());
}
