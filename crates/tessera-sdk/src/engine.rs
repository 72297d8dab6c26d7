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

//! The engine state machine and its tick loop.

use crate::action::{Action, ActionError, ActionQueue};
use crate::config::EngineConfig;
use crate::logging::init_logging;
use std::fmt;
use std::time::{Duration, Instant};
use tessera_io::{
    DirectorySource, PngBitmapLoader, ResourceManager, StreamSource, TileMapLoader,
};

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Created, `init` not called yet.
    Init,
    /// Initialized, waiting for its first tick.
    FirstTick,
    /// Ticking normally.
    Running,
    /// Ticking actions only; resources are not updated.
    Paused,
    /// Stopped. Further ticks do nothing.
    Quit,
}

type ActionHandler = Box<dyn FnMut(u32) + Send>;

/// Drives timed actions and per-frame resource updates.
///
/// The engine owns its [`ResourceManager`]; every resource the application
/// loads goes through [`Engine::resources`].
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    resources: ResourceManager,
    actions: ActionQueue,
    action_handler: Option<ActionHandler>,
    clock: Duration,
    frames: u64,
}

impl Engine {
    /// Creates an engine reading resources from `source`.
    ///
    /// The PNG bitmap and JSON tile map loaders are registered up front.
    pub fn new(config: EngineConfig, source: impl StreamSource + 'static) -> Self {
        let resources = ResourceManager::with_settings(source, config.resource_settings());
        resources.add_loader(PngBitmapLoader);
        resources.add_loader(TileMapLoader);

        Self {
            actions: ActionQueue::new(config.action_queue_capacity),
            config,
            state: EngineState::Init,
            resources,
            action_handler: None,
            clock: Duration::ZERO,
            frames: 0,
        }
    }

    /// Creates an engine reading resources from the configured asset root.
    ///
    /// This is the application startup path: it also installs the global
    /// logger with the configured `log_filter`.
    pub fn from_config(config: EngineConfig) -> Self {
        init_logging(&config.log_filter);
        let source = DirectorySource::new(config.asset_root.clone());
        Self::new(config, source)
    }

    /// Sets the callback receiving [`Action::Custom`] ids.
    pub fn with_action_handler(mut self, handler: impl FnMut(u32) + Send + 'static) -> Self {
        self.action_handler = Some(Box::new(handler));
        self
    }

    /// Moves the engine from `Init` to `FirstTick`.
    ///
    /// Calling it again is reported and otherwise ignored.
    pub fn init(&mut self) {
        if self.state != EngineState::Init {
            log::error!("Trying to re-initialize engine (state: {:?})", self.state);
            return;
        }

        log::info!(
            "Initializing engine ({} loaders, tick rate {} Hz)",
            self.resources.loader_count(),
            self.config.tick_rate_hz
        );
        self.state = EngineState::FirstTick;
    }

    /// Advances the engine clock by `delta`.
    ///
    /// An uninitialized engine is initialized instead. Every action due at
    /// the new time runs in timestamp order, then loaded resources receive
    /// `delta` unless the engine is paused or quitting.
    pub fn tick(&mut self, delta: Duration) {
        match self.state {
            EngineState::Init => {
                self.init();
                return;
            }
            EngineState::Quit => return,
            EngineState::FirstTick => {
                log::debug!("First engine tick");
                self.state = EngineState::Running;
            }
            EngineState::Running | EngineState::Paused => {}
        }

        self.clock += delta;

        while self.state != EngineState::Quit {
            let Some(action) = self.actions.pop_due(self.clock) else {
                break;
            };
            self.execute_action(action);
        }

        if self.state == EngineState::Running {
            self.resources.tick(delta);
            self.frames += 1;
        }
    }

    /// Applies `action` immediately.
    pub fn execute_action(&mut self, action: Action) {
        log::trace!("Executing {:?} at {:?}", action, self.clock);
        match action {
            Action::Quit => {
                log::info!("Engine quitting after {} frames", self.frames);
                self.state = EngineState::Quit;
            }
            Action::Pause => self.set_paused(true),
            Action::Resume => self.set_paused(false),
            Action::PauseToggle => {
                let paused = self.state == EngineState::Paused;
                self.set_paused(!paused);
            }
            Action::Custom(id) => match self.action_handler.as_mut() {
                Some(handler) => handler(id),
                None => log::warn!("No handler for custom action {}", id),
            },
        }
    }

    fn set_paused(&mut self, paused: bool) {
        self.state = match (self.state, paused) {
            (EngineState::Running, true) => EngineState::Paused,
            (EngineState::Paused, false) => EngineState::Running,
            (state, _) => state,
        };
    }

    /// Schedules `action` at engine time `at`.
    pub fn queue_action(&mut self, action: Action, at: Duration) -> Result<(), ActionError> {
        self.actions.push(action, at)
    }

    /// Schedules `action` to run on the next tick.
    pub fn queue_action_for_next_tick(&mut self, action: Action) -> Result<(), ActionError> {
        self.actions.push(action, self.clock)
    }

    /// Ticks at the configured rate until the engine quits.
    pub fn run(&mut self) {
        let interval = self.config.tick_interval();
        let mut last = Instant::now();

        while self.state != EngineState::Quit {
            let now = Instant::now();
            self.tick(now - last);
            last = now;

            let spent = last.elapsed();
            if spent < interval {
                std::thread::sleep(interval - spent);
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the engine is initialized and has not quit.
    pub fn is_running(&self) -> bool {
        !matches!(self.state, EngineState::Init | EngineState::Quit)
    }

    /// The resource manager owned by this engine.
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Engine time: the sum of every tick's `delta`.
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Number of ticks that updated resources.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of actions waiting to run.
    pub fn pending_actions(&self) -> usize {
        self.actions.len()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("frames", &self.frames)
            .field("pending_actions", &self.actions.len())
            .field("resources", &self.resources)
            .finish()
    }
}
