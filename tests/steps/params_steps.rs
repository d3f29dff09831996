#![allow(clippy::expect_used, reason = "simplify test failure output")]

use cli_project_lib::{ParamValue, ProcessParams, process_params_to_args};
use cucumber::{World, given, then, when};

#[derive(Debug, Default, World)]
pub struct ParamsWorld {
    params: ProcessParams,
    json: Option<String>,
    args: Option<Vec<String>>,
    parse_error: Option<serde_json::Error>,
}

#[given(regex = r#"^the flag "(.+)" set to "(.*)"$"#)]
fn flag_set_to(world: &mut ParamsWorld, key: String, value: String) {
    world.params.insert(key, value);
}

#[given(regex = r#"^the switch "(.+)" turned (on|off)$"#)]
fn switch_turned(world: &mut ParamsWorld, key: String, state: String) {
    world.params.insert(key, state == "on");
}

#[given(regex = r#"^the list "(.+)" with values "(.*)"$"#)]
fn list_with_values(world: &mut ParamsWorld, key: String, values: String) {
    let items: Vec<ParamValue> = values
        .split(',')
        .filter(|v| !v.is_empty())
        .map(ParamValue::from)
        .collect();
    world.params.insert(key, ParamValue::List(items));
}

#[given(regex = r#"^the positional argument "(.+)"$"#)]
fn positional_argument(world: &mut ParamsWorld, value: String) {
    world.params = std::mem::take(&mut world.params).positional(value);
}

#[given(regex = r#"^the number "(.+)" set to (-?\d+)$"#)]
fn number_set_to(world: &mut ParamsWorld, key: String, value: i64) {
    world.params.insert(key, value);
}

#[given(regex = r"^the JSON parameters '(.+)'$")]
fn json_parameters(world: &mut ParamsWorld, json: String) {
    world.json = Some(json);
}

#[when("the parameters are serialised")]
fn parameters_are_serialised(world: &mut ParamsWorld) {
    if let Some(json) = world.json.take() {
        match serde_json::from_str::<ProcessParams>(&json) {
            Ok(params) => world.params = params,
            Err(e) => {
                world.parse_error = Some(e);
                return;
            }
        }
    }
    world.args = Some(process_params_to_args(&world.params));
}

#[then(regex = r#"^the arguments are "(.*)"$"#)]
fn arguments_are(world: &mut ParamsWorld, expected: String) {
    let args = world.args.as_ref().expect("parameters were serialised");
    let expected: Vec<&str> = expected.split_whitespace().collect();
    assert_eq!(args, &expected);
}

#[then("no arguments are produced")]
fn no_arguments(world: &mut ParamsWorld) {
    let args = world.args.as_ref().expect("parameters were serialised");
    assert!(args.is_empty(), "unexpected arguments: {args:?}");
}

#[then("parsing fails")]
fn parsing_fails(world: &mut ParamsWorld) {
    assert!(world.parse_error.is_some());
    assert!(world.args.is_none());
}
