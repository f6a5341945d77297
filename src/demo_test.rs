use super::*;

fn tiny_config() -> DemoConfig {
    DemoConfig {
        world_size: 64,
        steps: 2,
        units_per_step: 3,
        seed: 123,
    }
}

fn generate(config: &DemoConfig) -> Vec<u8> {
    let mut client = RewindClient::from_writer(Vec::new());
    run(&mut client, config).expect("demo run");
    client.into_inner()
}

fn parse(bytes: &[u8]) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("valid command stream")
}

fn count(values: &[serde_json::Value], kind: &str) -> usize {
    values.iter().filter(|value| value["type"] == kind).count()
}

#[test]
fn tiny_scene_has_expected_shape() {
    let values = parse(&generate(&tiny_config()));

    // 2x2 terrain grid, then 2 step frames of 3 units each, then the
    // closing message frame.
    assert_eq!(count(&values, "end"), 4);
    assert_eq!(count(&values, "area"), 4);
    assert_eq!(count(&values, "message"), 4);
    assert_eq!(count(&values, "unit"), 6);
    assert_eq!(count(&values, "line"), 6);
    assert_eq!(count(&values, "circle"), 6);
    assert_eq!(count(&values, "rectangle"), 6);

    assert_eq!(values[4]["message"], "Hello World");
    assert_eq!(values[values.len() - 2]["message"], "Bye!");
    assert_eq!(values[values.len() - 1]["type"], "end");
}

#[test]
fn scene_is_deterministic_for_a_fixed_seed() {
    assert_eq!(generate(&tiny_config()), generate(&tiny_config()));
}

#[test]
fn seed_changes_the_stream() {
    let other = DemoConfig {
        seed: 124,
        ..tiny_config()
    };
    assert_ne!(generate(&tiny_config()), generate(&other));
}

#[test]
fn every_step_frame_carries_its_step_message() {
    let values = parse(&generate(&tiny_config()));
    let messages: Vec<&str> = values
        .iter()
        .filter(|value| value["type"] == "message")
        .map(|value| value["message"].as_str().expect("message text"))
        .collect();
    assert_eq!(messages, ["Hello World", "Step 0", "Step 1", "Bye!"]);
}
