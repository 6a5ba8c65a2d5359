//! End-to-end controller tests over file-backed storage
//!
//! Each test plays a host: start, water, tick frames, drop the controller and
//! start again from the same state directory.

use plant_growth::persistence::{FileStorage, Storage};
use plant_growth::sim::{GrowthEvent, GrowthPhase};
use plant_growth::{PlantController, PlantSettings};

const FRAME: f32 = 1.0 / 60.0;

fn open(dir: &std::path::Path) -> PlantController<FileStorage> {
    let mut controller =
        PlantController::new(PlantSettings::default(), FileStorage::new(dir)).unwrap();
    controller.start();
    controller
}

fn run_frames(controller: &mut PlantController<FileStorage>, frames: usize) -> Vec<GrowthEvent> {
    (0..frames).flat_map(|_| controller.on_tick(FRAME)).collect()
}

#[test]
fn fresh_plant_waits_for_water() {
    let dir = tempfile::tempdir().unwrap();
    let mut plant = open(dir.path());

    assert_eq!(plant.phase(), GrowthPhase::Idle);
    assert!(run_frames(&mut plant, 600).is_empty());
    assert_eq!(plant.state().elapsed_time(), 0.0);
    assert_eq!(plant.state().stage_index(), 0);
}

#[test]
fn progress_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut plant = open(dir.path());
    plant.on_water_requested();
    // 21 seconds: stage 1 reached at 20s and saved then
    run_frames(&mut plant, 21 * 60);
    assert_eq!(plant.state().stage_index(), 1);
    drop(plant);

    let plant = open(dir.path());
    assert_eq!(plant.phase(), GrowthPhase::Growing);
    assert_eq!(plant.state().stage_index(), 1);
    assert!(plant.state().watered());
    let elapsed = plant.state().elapsed_time();
    assert!((19.9..=21.1).contains(&elapsed), "elapsed = {elapsed}");
}

#[test]
fn full_growth_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut plant = open(dir.path());

    assert_eq!(plant.on_water_requested(), vec![GrowthEvent::Watered]);
    let events = run_frames(&mut plant, 61 * 60);

    let stages: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GrowthEvent::StageChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(stages, vec![1, 2, 3]);
    assert_eq!(events.iter().filter(|e| **e == GrowthEvent::Completed).count(), 1);
    assert_eq!(plant.phase(), GrowthPhase::Complete);

    // Completed plants stay completed across restarts
    drop(plant);
    let mut plant = open(dir.path());
    assert_eq!(plant.phase(), GrowthPhase::Complete);
    assert!(plant.on_water_requested().is_empty());
    assert!(run_frames(&mut plant, 60).is_empty());
}

#[test]
fn corrupt_save_resets_plant() {
    let dir = tempfile::tempdir().unwrap();
    let settings = PlantSettings::default();

    let mut storage = FileStorage::new(dir.path());
    storage.set(&settings.storage_key, b"{\"elapsed_time\": \"soon\"}").unwrap();

    let plant = open(dir.path());
    assert_eq!(plant.phase(), GrowthPhase::Idle);

    // The corrupt record was replaced by a fresh one
    let record = plant.store().try_load().unwrap().unwrap();
    assert_eq!(record.elapsed_time, 0.0);
    assert!(!record.watered);
}

#[test]
fn fast_growth_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut plant = open(dir.path());
    plant.on_water_requested();
    let events = plant.fast_growth();
    assert!(events.contains(&GrowthEvent::StageChanged { from: 0, to: 2 }));
    let before = plant.state().clone();
    drop(plant);

    // No frames ticked: the skip itself was saved
    let mut plant = open(dir.path());
    assert_eq!(plant.state(), &before);
    assert_eq!(plant.state().elapsed_time(), 59.0);
    assert_eq!(plant.state().stage_index(), 2);

    let events = run_frames(&mut plant, 61);
    assert!(events.contains(&GrowthEvent::Completed));
    assert_eq!(plant.phase(), GrowthPhase::Complete);
}

#[test]
fn delete_save_then_restart_is_fresh() {
    let dir = tempfile::tempdir().unwrap();

    let mut plant = open(dir.path());
    plant.on_water_requested();
    run_frames(&mut plant, 30 * 60);
    assert!(plant.delete_save_data());
    assert!(plant.store().load().is_none());
    drop(plant);

    let plant = open(dir.path());
    assert_eq!(plant.phase(), GrowthPhase::Idle);
    assert_eq!(plant.state().elapsed_time(), 0.0);
}

#[test]
fn custom_settings_change_stage_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let settings = PlantSettings {
        growth_duration: 10.0,
        stage_count: 6,
        ..Default::default()
    };
    let mut plant = PlantController::new(settings, FileStorage::new(dir.path())).unwrap();
    plant.start();
    plant.on_water_requested();

    // 4s of 10s over 5 steps: floor(0.4 * 5) = 2
    for _ in 0..4 {
        plant.on_tick(1.0);
    }
    assert_eq!(plant.state().stage_index(), 2);
    assert_eq!(plant.status().to_string(), "Growth progress: 40.0% | Stage: 3/6 | Time: 4/10s");
}
