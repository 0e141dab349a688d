//! Behaviour-driven step definitions driving the nearby CLI scenarios.

use super::helpers::InputFiles;
use super::*;
use crate::nearby::run_nearby_with;
use nightstop_core::PointLodgings;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct NearbyWorld {
    files: InputFiles,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl NearbyWorld {
    fn new() -> Self {
        Self {
            files: InputFiles::new(),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec![
            "nightstop".to_owned(),
            "nearby".to_owned(),
            self.files.route().as_str().to_owned(),
            format!("--{ARG_HOTELS}"),
            self.files.hotels().as_str().to_owned(),
            format!("--{ARG_SHELTERS}"),
            self.files.shelters().as_str().to_owned(),
        ];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }
}

#[fixture]
fn nearby_world() -> NearbyWorld {
    NearbyWorld::new()
}

#[given("a route and both lodging collections on disk")]
fn nearby_inputs_exist(#[from(nearby_world)] world: &NearbyWorld) {
    assert!(world.files.hotels().is_file(), "hotel fixture written");
}

#[given("I ask for {limit} lodgings every {stride} vertices")]
fn ask_for_lodgings(#[from(nearby_world)] world: &NearbyWorld, limit: usize, stride: usize) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_LIMIT}"),
        limit.to_string(),
        format!("--{ARG_STRIDE}"),
        stride.to_string(),
    ]);
}

#[when("I run the nearby command")]
fn run_nearby_command(#[from(nearby_world)] world: &NearbyWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Nearby(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_nearby_with(args, &mut *buffer)
        }
        Command::Plan(_) => panic!("expected nearby command"),
    });
    world.result.replace(Some(outcome));
}

#[then("each sampled vertex lists 2 lodgings nearest first")]
fn lists_nearest_first(#[from(nearby_world)] world: &NearbyWorld) {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let results: Vec<PointLodgings> =
        serde_json::from_str(&stdout).expect("output should be JSON");
    assert_eq!(results.len(), 2, "vertices 0 and 10 of 11");
    for point in &results {
        assert_eq!(point.lodgings.len(), 2);
        let distances: Vec<f64> = point.lodgings.iter().map(|n| n.distance).collect();
        assert!(
            distances.windows(2).all(|pair| match pair {
                [closer, farther] => closer <= farther,
                _ => true,
            }),
            "distances out of order: {distances:?}"
        );
    }
}

#[then("the command fails because the stride is zero")]
fn fails_on_zero_stride(#[from(nearby_world)] world: &NearbyWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::ZeroStride) => {}
        other => panic!("expected ZeroStride, found {other:?}"),
    }
}

#[scenario(path = "tests/features/nearby_command.feature", index = 0)]
fn nearby_lists_closest(nearby_world: NearbyWorld) {
    let _ = nearby_world;
}

#[scenario(path = "tests/features/nearby_command.feature", index = 1)]
fn nearby_rejects_zero_stride(nearby_world: NearbyWorld) {
    let _ = nearby_world;
}
