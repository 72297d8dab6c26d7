// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tessera_core::Resource;
use tessera_io::MemorySource;
use tessera_sdk::{Action, ActionError, Engine, EngineConfig, EngineState};

const FRAME: Duration = Duration::from_millis(10);

#[derive(Default)]
struct Clockwork {
    elapsed_ms: AtomicU64,
}

impl Resource for Clockwork {
    fn tick(&self, delta: Duration) {
        self.elapsed_ms
            .fetch_add(delta.as_millis() as u64, Ordering::SeqCst);
    }
}

fn started_engine(config: EngineConfig) -> Engine {
    let mut engine = Engine::new(config, MemorySource::new());
    engine.init();
    engine.tick(FRAME);
    engine
}

#[test]
fn test_engine_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.ron");
    std::fs::write(
        &path,
        "(action_queue_capacity: 3, load_wait_timeout_ms: Some(100))",
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    let engine = Engine::from_config(config);
    assert_eq!(engine.config().action_queue_capacity, 3);
    assert_eq!(
        engine.resources().settings().load_wait_timeout,
        Some(Duration::from_millis(100))
    );
}

#[test]
fn test_from_config_installs_logger() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        asset_root: dir.path().to_path_buf(),
        log_filter: "info".to_string(),
        ..Default::default()
    };

    let engine = Engine::from_config(config);
    assert!(log::max_level() >= log::LevelFilter::Info || std::env::var_os("RUST_LOG").is_some());
    assert_eq!(engine.state(), EngineState::Init);
}

#[test]
fn test_pause_and_resume_on_schedule() {
    let mut engine = started_engine(EngineConfig::default());
    let clockwork = engine.resources().make("clockwork", Clockwork::default());

    engine.queue_action(Action::Pause, Duration::from_millis(30)).unwrap();
    engine.queue_action(Action::Resume, Duration::from_millis(60)).unwrap();

    let mut states = Vec::new();
    for _ in 0..8 {
        engine.tick(FRAME);
        states.push(engine.state());
    }

    assert_eq!(
        states,
        vec![
            EngineState::Running,
            EngineState::Paused,
            EngineState::Paused,
            EngineState::Paused,
            EngineState::Running,
            EngineState::Running,
            EngineState::Running,
            EngineState::Running,
        ]
    );
    // Ticks at 20, 60, 70, 80 and 90 ms reach the resource.
    assert_eq!(clockwork.get().unwrap().elapsed_ms.load(Ordering::SeqCst), 50);
    assert_eq!(engine.frames(), 6);
}

#[test]
fn test_actions_run_in_timestamp_order() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&order);
    let mut engine = Engine::new(EngineConfig::default(), MemorySource::new())
        .with_action_handler(move |id| sink.lock().unwrap().push(id));
    engine.init();

    engine.queue_action(Action::Custom(3), Duration::from_millis(20)).unwrap();
    engine.queue_action(Action::Custom(1), Duration::from_millis(5)).unwrap();
    engine.queue_action(Action::Custom(2), Duration::from_millis(20)).unwrap();
    engine.queue_action(Action::Custom(4), Duration::from_millis(500)).unwrap();

    engine.tick(Duration::from_millis(25));
    assert_eq!(*order.lock().unwrap(), vec![1, 3, 2]);
    assert_eq!(engine.pending_actions(), 1);
}

#[test]
fn test_queue_overflow_is_reported() {
    let config = EngineConfig {
        action_queue_capacity: 2,
        ..Default::default()
    };
    let mut engine = started_engine(config);
    engine.queue_action_for_next_tick(Action::Custom(0)).unwrap();
    engine.queue_action_for_next_tick(Action::Custom(1)).unwrap();
    assert_eq!(
        engine.queue_action_for_next_tick(Action::Quit),
        Err(ActionError::QueueFull { capacity: 2 })
    );

    engine.tick(FRAME);
    assert!(engine.queue_action_for_next_tick(Action::Quit).is_ok());
    engine.tick(FRAME);
    assert_eq!(engine.state(), EngineState::Quit);
    assert!(!engine.is_running());
}

#[test]
fn test_quit_stops_resource_updates() {
    let mut engine = started_engine(EngineConfig::default());
    let clockwork = engine.resources().make("clockwork", Clockwork::default());

    engine.tick(FRAME);
    engine.execute_action(Action::Quit);
    engine.tick(FRAME);
    engine.tick(FRAME);

    assert_eq!(clockwork.get().unwrap().elapsed_ms.load(Ordering::SeqCst), 10);
}
