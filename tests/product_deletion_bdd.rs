//! Behavioural tests for product deletion against a mock catalog service.

#[path = "product_deletion_bdd/mod.rs"]
mod product_deletion_bdd_support;

use product_deletion_bdd_support::{DeletionState, StepResult};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use vitrine::ReviewMsg;
use vitrine::listing::ListingQuery;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

#[fixture]
fn deletion_state() -> DeletionState {
    DeletionState::default()
}

fn is_listed(
    deletion_state: &DeletionState,
    product_id: u64,
) -> Result<bool, Box<dyn std::error::Error>> {
    deletion_state
        .controller
        .with_ref(|controller| controller.products().contains(&product_id))
        .ok_or_else(|| "controller should be initialised".into())
}

// Given steps

#[given("a catalog service that answers product deletions with status {status:u16}")]
fn given_catalog_service(deletion_state: &DeletionState, status: u16) -> StepResult {
    let runtime = deletion_state.start_server()?;
    let mock = Mock::given(method("DELETE"))
        .and(path_regex(r"^/delete/\d+$"))
        .respond_with(ResponseTemplate::new(status).set_body_string("product deletion"));

    deletion_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or("mock server should be started")?;
    Ok(())
}

#[given("the listing is on page {page:u32} with {per_page:u32} per page searching for {search}")]
fn given_listing_position(
    deletion_state: &DeletionState,
    page: u32,
    per_page: u32,
    search: String,
) -> StepResult {
    let query = ListingQuery::new(page, per_page, search.trim_matches('"'))?;
    deletion_state.query.set(query);
    Ok(())
}

#[given("product {product_id:u64} is listed")]
fn given_product_listed(deletion_state: &DeletionState, product_id: u64) -> StepResult {
    let controller = deletion_state.build_controller(product_id)?;
    deletion_state.controller.set(controller);
    Ok(())
}

// When steps

#[when("the user confirms deleting product {product_id:u64}")]
fn when_user_deletes_product(deletion_state: &DeletionState, product_id: u64) -> StepResult {
    deletion_state.send(ReviewMsg::DeleteProduct { product_id })
}

// Then steps

#[then(
    "the service received a deletion of product {product_id:u64} for page {page:u32} with {per_page:u32} per page"
)]
fn then_service_received_deletion(
    deletion_state: &DeletionState,
    product_id: u64,
    page: u32,
    per_page: u32,
) -> StepResult {
    let runtime = deletion_state.start_server()?;
    let requests = deletion_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .ok_or("mock server should be started")?
        .ok_or("request recording should be enabled")?;

    let request = requests
        .iter()
        .find(|request| request.url.path() == format!("/delete/{product_id}"))
        .ok_or_else(|| format!("no deletion of product {product_id} was received"))?;
    let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
    let expected = ListingQuery::new(
        page,
        per_page,
        deletion_state
            .query
            .with_ref(|query| query.search().to_owned())
            .unwrap_or_default(),
    )?
    .to_query_pairs()
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value))
    .collect::<Vec<_>>();

    if pairs != expected {
        return Err(format!("expected query {expected:?}, got {pairs:?}").into());
    }
    Ok(())
}

#[then("product {product_id:u64} is no longer listed")]
fn then_product_not_listed(deletion_state: &DeletionState, product_id: u64) -> StepResult {
    if is_listed(deletion_state, product_id)? {
        return Err(format!("expected product {product_id} to be removed").into());
    }
    Ok(())
}

#[then("product {product_id:u64} is still listed")]
fn then_product_still_listed(deletion_state: &DeletionState, product_id: u64) -> StepResult {
    if !is_listed(deletion_state, product_id)? {
        return Err(format!("expected product {product_id} to remain listed").into());
    }
    Ok(())
}

#[then("the error contains {text}")]
fn then_error_contains(deletion_state: &DeletionState, text: String) -> StepResult {
    let expected = text.trim_matches('"');
    let error = deletion_state
        .controller
        .with_ref(|controller| controller.last_error().map(ToString::to_string))
        .ok_or("controller should be initialised")?
        .ok_or("expected an error to be recorded")?;
    if !error.contains(expected) {
        return Err(format!("expected error to contain '{expected}', got '{error}'").into());
    }
    Ok(())
}

#[then("no error is shown")]
fn then_no_error(deletion_state: &DeletionState) -> StepResult {
    let error = deletion_state
        .controller
        .with_ref(|controller| controller.last_error().map(ToString::to_string))
        .ok_or("controller should be initialised")?;
    if let Some(message) = error {
        return Err(format!("expected no error, got '{message}'").into());
    }
    Ok(())
}

// Scenario bindings

#[scenario(path = "tests/features/product_deletion.feature", index = 0)]
fn deleting_keeps_listing_position(deletion_state: DeletionState) {
    let _ = deletion_state;
}

#[scenario(path = "tests/features/product_deletion.feature", index = 1)]
fn rejected_deletion_keeps_product(deletion_state: DeletionState) {
    let _ = deletion_state;
}
