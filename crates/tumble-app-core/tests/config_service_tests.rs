// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
use std::cell::RefCell;
use std::collections::BTreeMap;

use tumble_app_core::config::{ConfigError, ConfigService, ConfigStore};
use tumble_app_core::{SceneKind, SimConfig, SIM_CONFIG_KEY};

#[derive(Default)]
struct MemStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl ConfigStore for MemStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[test]
fn sim_config_survives_the_store() {
    let svc = ConfigService::new(MemStore::default());
    let cfg = SimConfig {
        frames: 30,
        scene: SceneKind::Scattered,
        seed: 42,
        cube_count: 4,
        ..SimConfig::default()
    };
    svc.save(SIM_CONFIG_KEY, &cfg).expect("save");
    let back: SimConfig = svc.load_or_default(SIM_CONFIG_KEY).expect("load");
    assert_eq!(back, cfg);
}

#[test]
fn stored_config_drives_identical_runs() {
    let cfg = SimConfig {
        scene: SceneKind::Scattered,
        seed: 9,
        cube_count: 3,
        ..SimConfig::default()
    };
    let run = || {
        let mut scene = cfg.build_scene().expect("scene");
        for _ in 0..cfg.frames {
            scene.world.step(cfg.frame_dt).expect("step");
        }
        scene.world.snapshot()
    };
    assert_eq!(run(), run());
}
