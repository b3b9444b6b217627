//! 并发一次性输出测试

use rayon::prelude::*;
use ssh_flow_logger::core::{FlowTable, Packet};
use ssh_flow_logger::emit::SkipReason;
use ssh_flow_logger::output::MemorySink;
use ssh_flow_logger::ssh::SshState;
use ssh_flow_logger::{EmitOutcome, EmitterBuilder, SshLogEmitter};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Barrier};
use std::thread;

const WORKERS: usize = 16;

fn client() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 9, 0, 1))
}

fn server() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(10, 9, 0, 2))
}

fn complete_state() -> Box<SshState> {
    let mut state = SshState::new();
    state.record_client_line("SSH-2.0-libssh").unwrap();
    state.record_server_line("SSH-2.0-dropbear").unwrap();
    Box::new(state)
}

fn setup() -> (Arc<SshLogEmitter>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let emitter = EmitterBuilder::new().with_sink(sink.clone()).build().unwrap();
    (Arc::new(emitter), sink)
}

#[test]
fn test_racing_workers_emit_exactly_once() {
    let (emitter, sink) = setup();
    let table = FlowTable::new();
    let packet = table.attach(Packet::tcp(client(), 40222, server(), 22)).unwrap();
    packet.flow.as_ref().unwrap().attach_app_state(complete_state()).unwrap();

    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let emitter = Arc::clone(&emitter);
            let barrier = Arc::clone(&barrier);
            // 一半工作线程处理客户端方向，一半处理服务端方向
            let packet = if i % 2 == 0 {
                packet.clone()
            } else {
                table.attach(Packet::tcp(server(), 22, client(), 40222)).unwrap()
            };
            thread::spawn(move || {
                barrier.wait();
                emitter.process(&packet).unwrap()
            })
        })
        .collect();

    let outcomes: Vec<EmitOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let emitted = outcomes.iter().filter(|o| o.is_emitted()).count();
    assert_eq!(emitted, 1);
    assert!(outcomes
        .iter()
        .filter(|o| !o.is_emitted())
        .all(|o| *o == EmitOutcome::Skipped(SkipReason::AlreadyLogged)));
    assert_eq!(sink.len().unwrap(), 1);
    assert_eq!(sink.attempts(), 1);
}

#[test]
fn test_racing_log_phase_after_shared_precheck() {
    let (emitter, sink) = setup();
    let table = FlowTable::new();
    let packet = table.attach(Packet::tcp(client(), 40223, server(), 22)).unwrap();
    packet.flow.as_ref().unwrap().attach_app_state(complete_state()).unwrap();

    // 所有工作线程先都通过读锁预检，再同时进入写锁阶段
    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let emitter = Arc::clone(&emitter);
            let barrier = Arc::clone(&barrier);
            let packet = packet.clone();
            thread::spawn(move || {
                let passed = emitter.condition(&packet).unwrap();
                barrier.wait();
                assert!(passed);
                emitter.log(&packet).unwrap()
            })
        })
        .collect();

    let emitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(EmitOutcome::is_emitted)
        .count();
    assert_eq!(emitted, 1);
    assert_eq!(sink.attempts(), 1);
}

#[test]
fn test_many_flows_each_emit_once_under_rayon() {
    let (emitter, sink) = setup();
    let table = FlowTable::new();

    let packets: Vec<Packet> = (0..64u16)
        .map(|i| {
            let packet = table.attach(Packet::tcp(client(), 30000 + i, server(), 22)).unwrap();
            packet.flow.as_ref().unwrap().attach_app_state(complete_state()).unwrap();
            packet
        })
        .collect();

    // 每个流的数据包重复投递给多个并行任务
    let work: Vec<&Packet> = packets.iter().cycle().take(packets.len() * 8).collect();
    work.par_iter().for_each(|packet| {
        emitter.process(packet).unwrap();
    });

    let events = sink.events().unwrap();
    assert_eq!(events.len(), packets.len());
    let flow_ids: HashSet<u64> = events.iter().map(|e| e.flow_id).collect();
    assert_eq!(flow_ids.len(), packets.len());

    let stats = emitter.stats();
    assert_eq!(stats.emitted, 64);
    assert_eq!(stats.skipped_logged, 64 * 7);
}

#[test]
fn test_rejecting_sink_under_concurrency_never_marks() {
    let (emitter, sink) = setup();
    sink.set_rejecting(true);

    let table = FlowTable::new();
    let packet = table.attach(Packet::tcp(client(), 40224, server(), 22)).unwrap();
    packet.flow.as_ref().unwrap().attach_app_state(complete_state()).unwrap();

    (0..WORKERS).into_par_iter().for_each(|_| {
        assert_eq!(emitter.process(&packet).unwrap(), EmitOutcome::SinkRejected);
    });

    let guard = packet.flow.as_ref().unwrap().read().unwrap();
    assert!(!guard.app_state_as::<SshState>().unwrap().is_logged());
    assert!(sink.is_empty().unwrap());
    assert_eq!(sink.attempts(), WORKERS as u64);
}
