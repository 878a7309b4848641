//! End-to-end replication between one authority and several observers.

use std::sync::{Arc, Mutex};

use attr_client::{ObserverClient, ServerLink, UiContext};
use attr_server::{AuthorityServer, ServerSettings};
use attr_shared::connection::ConnectionState;
use attr_shared::object::ObjectId;
use attr_shared::property::{AttributeConfig, AttributeField};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Calls = Arc<Mutex<Vec<(ObjectId, AttributeField, String, String)>>>;

fn connect(server: &mut AuthorityServer) -> ObserverClient {
    let link = server.client_connected();
    ObserverClient::new(ServerLink::new(link.observer_id, link.updates, link.requests))
}

fn record(client: &mut ObserverClient) -> Calls {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    client.set_field_observer(move |id: ObjectId, field: AttributeField, old: &str, new: &str| {
        sink.lock()
            .unwrap()
            .push((id, field, old.to_string(), new.to_string()));
    });
    calls
}

fn field_calls(calls: &Calls, field: AttributeField) -> Vec<(String, String)> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|call| call.1 == field)
        .map(|call| (call.2.clone(), call.3.clone()))
        .collect()
}

fn pair(old: &str, new: &str) -> (String, String) {
    (old.to_string(), new.to_string())
}

#[test]
fn late_joiner_first_sees_a_replay() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("Spanner", AttributeConfig::new("spanner", "shiny"));
    server.set_article_name(id, "wrench").unwrap();

    let mut client = connect(&mut server);
    let calls = record(&mut client);
    client.poll();

    assert_eq!(field_calls(&calls, AttributeField::Name), vec![pair("wrench", "wrench")]);
    assert_eq!(
        field_calls(&calls, AttributeField::Description),
        vec![pair("shiny", "shiny")]
    );
    assert_eq!(client.object(id).unwrap().article_name(), "wrench");
}

#[test]
fn spawn_while_connected_arrives_as_change() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let mut client = connect(&mut server);
    let calls = record(&mut client);

    server.spawn("Spanner", AttributeConfig::new("spanner", ""));
    client.poll();

    assert_eq!(
        field_calls(&calls, AttributeField::Name),
        vec![pair("", ""), pair("", "spanner")]
    );
}

#[test]
fn hooks_diff_against_the_stored_value() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("Spanner", AttributeConfig::new("spanner", ""));
    let mut client = connect(&mut server);
    let calls = record(&mut client);

    server.set_article_name(id, "a").unwrap();
    server.set_article_name(id, "b").unwrap();
    server.set_article_name(id, "b").unwrap();
    client.poll();

    assert_eq!(
        field_calls(&calls, AttributeField::Name),
        vec![
            pair("spanner", "spanner"),
            pair("spanner", "a"),
            pair("a", "b"),
            pair("b", "b"),
        ]
    );
}

#[test]
fn observers_agree_on_commit_order() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("Spanner", AttributeConfig::new("spanner", ""));
    let mut early = connect(&mut server);
    let early_calls = record(&mut early);

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut committed: Vec<String> = Vec::new();
    let mut late: Option<(ObserverClient, Calls)> = None;
    let mut late_from = 0;

    for step in 0..200 {
        if step == 100 {
            let mut client = connect(&mut server);
            let calls = record(&mut client);
            late = Some((client, calls));
            late_from = committed.len();
        }
        match rng.gen_range(0..4) {
            0 | 1 => {
                let name = format!("name-{}", step);
                server.set_article_name(id, name.clone()).unwrap();
                committed.push(name);
            }
            2 => server
                .set_article_description(id, format!("desc-{}", step))
                .unwrap(),
            _ => {
                early.poll();
                if let Some((client, _)) = late.as_mut() {
                    client.poll();
                }
            }
        }
    }
    early.poll();
    let (mut late_client, late_calls) = late.unwrap();
    late_client.poll();

    let early_names = field_calls(&early_calls, AttributeField::Name);
    let mut expected = vec!["spanner".to_string()];
    expected.extend(committed.iter().cloned());
    assert_eq!(
        early_names.iter().map(|call| call.1.clone()).collect::<Vec<_>>(),
        expected
    );

    let late_names = field_calls(&late_calls, AttributeField::Name);
    let replayed = committed[..late_from]
        .last()
        .cloned()
        .unwrap_or_else(|| "spanner".to_string());
    let mut expected = vec![replayed.clone()];
    expected.extend(committed[late_from..].iter().cloned());
    assert_eq!(
        late_names.iter().map(|call| call.1.clone()).collect::<Vec<_>>(),
        expected
    );
    assert_eq!(late_names[0], (replayed.clone(), replayed));

    for names in [&early_names, &late_names] {
        for window in names.windows(2) {
            assert_eq!(window[1].0, window[0].1);
        }
    }
    assert_eq!(
        early.object(id).unwrap().article_description(),
        late_client.object(id).unwrap().article_description()
    );
}

#[test]
fn examine_answers_only_the_requester() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("Spanner(Clone)", AttributeConfig::new("", "shiny"));
    server.set_article_description(id, "rusty").unwrap();
    let mut asker = connect(&mut server);
    let mut bystander = connect(&mut server);
    asker.poll();
    bystander.poll();

    let options = asker.right_click_options(id).unwrap();
    let action = options.find("Examine").unwrap();
    asker.invoke_action(&action).unwrap();
    assert_eq!(server.process_requests(), 1);

    asker.poll();
    bystander.poll();
    assert_eq!(asker.examine_log().len(), 1);
    assert_eq!(asker.examine_log()[0].text, "This is a Spanner. shiny");
    assert!(bystander.examine_log().is_empty());
    assert_eq!(asker.tooltip_text(id).unwrap(), "Spanner (rusty)");
}

#[test]
fn hover_end_clears_after_the_failsafe_path() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("(Clone)", AttributeConfig::default());
    let mut client = connect(&mut server);
    client.poll();

    client.hover_start(id).unwrap();
    assert_eq!(client.ui().tooltip(), Some("error"));
    assert_eq!(client.ui().highlighted(), Some(id));

    client.hover_end();
    assert_eq!(client.ui(), &UiContext::default());
}

#[test]
fn destroy_reaches_every_observer() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("Spanner", AttributeConfig::new("spanner", ""));
    let mut first = connect(&mut server);
    let mut second = connect(&mut server);
    first.poll();
    second.poll();
    first.hover_start(id).unwrap();

    server.destroy(id).unwrap();
    first.poll();
    second.poll();

    assert_eq!(first.object_count(), 0);
    assert_eq!(second.object_count(), 0);
    assert_eq!(first.ui().tooltip(), None);
}

#[tokio::test]
async fn async_recv_runs_until_disconnect() {
    let mut server = AuthorityServer::new(ServerSettings::default()).unwrap();
    let id = server.spawn("Spanner", AttributeConfig::new("spanner", ""));
    let mut client = connect(&mut server);

    assert!(client.recv().await);
    assert_eq!(client.object(id).unwrap().article_name(), "spanner");

    server.client_disconnected(client.observer_id()).unwrap();
    assert!(!client.recv().await);
    assert_eq!(client.connection_state(), ConnectionState::Disconnected);
}
