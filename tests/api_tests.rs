mod common;

use reqwest::StatusCode;

// A well-formed id that no document ever has.
const ABSENT_ID: &str = "ffffffffffffffffffffffff";

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Auth ────────────────────────────────────────────────────────

#[tokio::test]
async fn login_valid_credentials() {
    let app = common::spawn_app().await;
    let (_, status) = app.seed().await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app.login("user@nextmail.com", "123456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged in successfully");
    assert_eq!(body["user"]["email"], "user@nextmail.com");
    assert_eq!(body["user"]["name"], "User");
}

#[tokio::test]
async fn login_never_returns_the_password() {
    let app = common::spawn_app().await;
    app.seed().await;

    let (body, _) = app.login("user@nextmail.com", "123456").await;
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn login_wrong_password_is_invalid_credentials() {
    let app = common::spawn_app().await;
    app.seed().await;

    let (body, status) = app.login("user@nextmail.com", "654321").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials.");
}

#[tokio::test]
async fn login_unknown_email_is_invalid_credentials() {
    let app = common::spawn_app().await;
    app.seed().await;

    let (body, status) = app.login("nobody@nextmail.com", "123456").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials.");
}

#[tokio::test]
async fn login_rejects_short_password_without_a_lookup() {
    let app = common::spawn_app().await;

    // Nothing seeded: a store lookup would find no user anyway, but the
    // short password must already have been rejected as malformed.
    let (body, status) = app.login("user@nextmail.com", "12345").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials.");
}

#[tokio::test]
async fn login_rejects_malformed_email() {
    let app = common::spawn_app().await;
    app.seed().await;

    let (body, status) = app.login("not-an-email", "123456").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials.");
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let app = common::spawn_app().await;
    app.seed().await;

    for path in [
        "/dashboard/cards",
        "/dashboard/revenue",
        "/dashboard/invoices",
        "/dashboard/invoices/pages",
        "/dashboard/invoices/latest",
        "/dashboard/customers",
        "/dashboard/customers/table",
    ] {
        let (_, status) = app.get_json(path).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "no rejection for {path}");
    }
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (_, status) = app.get_json("/dashboard/cards").await;
    assert_eq!(status, StatusCode::OK);

    let resp = app.client.post(app.url("/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, status) = app.get_json("/dashboard/cards").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_token_works_without_a_cookie_jar() {
    let app = common::spawn_app().await;
    app.seed().await;

    // A separate client with no cookie store at all.
    let bare = reqwest::Client::new();
    let resp = bare
        .post(app.url("/login"))
        .form(&[("email", "user@nextmail.com"), ("password", "123456")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie_header = resp
        .headers()
        .get("set-cookie")
        .expect("no session cookie issued")
        .to_str()
        .unwrap()
        .to_string();
    let token = cookie_header
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let resp = bare
        .get(app.url("/dashboard/cards"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ── Seed ────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_populates_all_collections() {
    let app = common::spawn_app().await;

    let (body, status) = app.seed().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Database seeded successfully");

    let (_, status) = app.login("user@nextmail.com", "123456").await;
    assert_eq!(status, StatusCode::OK);

    let (cards, status) = app.get_json("/dashboard/cards").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cards["numberOfInvoices"], 13);
    assert_eq!(cards["numberOfCustomers"], 6);

    let (revenue, _) = app.get_json("/dashboard/revenue").await;
    assert_eq!(revenue.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn seed_rerun_fails_and_leaves_counts_unchanged() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    // Users are seeded first, so the duplicate email stops the rerun
    // before any other group is written again.
    let (body, status) = app.seed().await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Seeding failed"));

    let (cards, _) = app.get_json("/dashboard/cards").await;
    assert_eq!(cards["numberOfInvoices"], 13);
    assert_eq!(cards["numberOfCustomers"], 6);
}

// ── Invoice creation ────────────────────────────────────────────

#[tokio::test]
async fn create_invoice_stores_exact_cents() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Evil Rabbit").await;

    let resp = app.create_invoice(&customer_id, "12.50", "pending").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard/invoices");

    // Issued just now, so it leads the date-descending first page.
    let (rows, status) = app.get_json("/dashboard/invoices").await;
    assert_eq!(status, StatusCode::OK);
    let first = &rows[0];
    assert_eq!(first["amount"], 1250);
    assert_eq!(first["status"], "pending");
    assert_eq!(first["name"], "Evil Rabbit");
}

#[tokio::test]
async fn create_invoice_with_whole_dollars() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Lee Robinson").await;

    let resp = app.create_invoice(&customer_id, "7", "paid").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (rows, _) = app.get_json("/dashboard/invoices").await;
    assert_eq!(rows[0]["amount"], 700);
}

#[tokio::test]
async fn create_invoice_empty_form_lists_every_field_error() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let resp = app.create_invoice("", "", "").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Missing Fields. Failed to Create Invoice.");
    assert_eq!(body["errors"]["customerId"][0], "Please select a customer.");
    assert_eq!(body["errors"]["amount"][0], "Please enter an amount greater than $0.");
    assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
}

#[tokio::test]
async fn create_invoice_rejects_bad_amounts() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Amy Burns").await;

    for bad in ["0", "-5", "12.345", "abc"] {
        let resp = app.create_invoice(&customer_id, bad, "pending").await;
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "amount {bad:?} was accepted"
        );
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["errors"]["amount"][0].is_string());
        assert!(body["errors"].get("customerId").is_none());
    }

    // Nothing was created.
    let (cards, _) = app.get_json("/dashboard/cards").await;
    assert_eq!(cards["numberOfInvoices"], 13);
}

#[tokio::test]
async fn create_invoice_rejects_unknown_status() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Amy Burns").await;

    let resp = app.create_invoice(&customer_id, "10.00", "overdue").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
}

#[tokio::test]
async fn create_invoice_for_missing_customer_is_rejected() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let resp = app.create_invoice(ABSENT_ID, "10.00", "pending").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Customer not found.");

    let (cards, _) = app.get_json("/dashboard/cards").await;
    assert_eq!(cards["numberOfInvoices"], 13);
}

// ── Invoice update & delete ─────────────────────────────────────

#[tokio::test]
async fn update_invoice_changes_fields_but_keeps_the_date() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let evil = app.customer_id("Evil Rabbit").await;
    let lee = app.customer_id("Lee Robinson").await;

    let resp = app.create_invoice(&evil, "12.50", "pending").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let (rows, _) = app.get_json("/dashboard/invoices").await;
    let id = rows[0]["id"].as_str().unwrap().to_string();

    let (before, status) = app.get_json(&format!("/dashboard/invoices/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["amount"], 1250);

    let resp = app.update_invoice(&id, &lee, "99.99", "paid").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/dashboard/invoices");

    let (after, _) = app.get_json(&format!("/dashboard/invoices/{id}")).await;
    assert_eq!(after["amount"], 9999);
    assert_eq!(after["status"], "paid");
    assert_eq!(after["customer_id"], lee.as_str());
    assert_eq!(after["date"], before["date"]);
}

#[tokio::test]
async fn update_invoice_validates_before_touching_the_store() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    // Even with a nonexistent id the malformed form is reported first.
    let resp = app.update_invoice(ABSENT_ID, "", "0", "").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Missing Fields. Failed to Update Invoice.");
}

#[tokio::test]
async fn update_missing_invoice_is_a_database_error() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Evil Rabbit").await;

    let resp = app.update_invoice(ABSENT_ID, &customer_id, "10.00", "paid").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Database Error: Failed to Update Invoice.");
}

#[tokio::test]
async fn delete_invoice_removes_the_row() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Balazs Orban").await;

    app.create_invoice(&customer_id, "42.00", "paid").await;
    let (rows, _) = app.get_json("/dashboard/invoices").await;
    let id = rows[0]["id"].as_str().unwrap().to_string();

    let (body, status) = app.delete_invoice(&id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted Invoice.");

    let (detail, status) = app.get_json(&format!("/dashboard/invoices/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "still present: {detail}");
}

#[tokio::test]
async fn delete_missing_invoice_reports_not_throws() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.delete_invoice(ABSENT_ID).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database Error: Failed to Delete Invoice.");

    // A second attempt answers identically.
    let (body, status) = app.delete_invoice(ABSENT_ID).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database Error: Failed to Delete Invoice.");
}

#[tokio::test]
async fn delete_malformed_id_reports_the_same_family() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.delete_invoice("not-an-id").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database Error: Failed to Delete Invoice.");
}

// ── Invoice listing, filtering, pagination ──────────────────────

#[tokio::test]
async fn listing_is_paginated_six_per_page_newest_first() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (page1, _) = app.get_json("/dashboard/invoices?page=1").await;
    let (page2, _) = app.get_json("/dashboard/invoices?page=2").await;
    let (page3, _) = app.get_json("/dashboard/invoices?page=3").await;

    assert_eq!(page1.as_array().unwrap().len(), 6);
    assert_eq!(page2.as_array().unwrap().len(), 6);
    assert_eq!(page3.as_array().unwrap().len(), 1);

    // Concatenated pages hold all 13 rows, dates never increasing.
    let all: Vec<&serde_json::Value> = page1
        .as_array()
        .unwrap()
        .iter()
        .chain(page2.as_array().unwrap())
        .chain(page3.as_array().unwrap())
        .collect();
    assert_eq!(all.len(), 13);
    let dates: Vec<&str> = all.iter().map(|r| r["date"].as_str().unwrap()).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]), "dates out of order: {dates:?}");

    let mut ids: Vec<&str> = all.iter().map(|r| r["id"].as_str().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 13, "pages overlap");

    // The most recent fixture invoice leads.
    assert_eq!(page1[0]["amount"], 44800);
    assert_eq!(page1[0]["name"], "Michael Novotny");
}

#[tokio::test]
async fn page_parameter_is_clamped_and_defaulted() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (default_page, _) = app.get_json("/dashboard/invoices").await;
    let (clamped, _) = app.get_json("/dashboard/invoices?page=-3").await;
    assert_eq!(default_page, clamped);
    assert_eq!(default_page.as_array().unwrap().len(), 6);

    // Far beyond the data: an empty page, not an error.
    let (far, status) = app.get_json("/dashboard/invoices?page=99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(far.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn page_numbers_at_the_integer_limit_return_an_empty_page() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let path = format!("/dashboard/invoices?page={}", i64::MAX);
    let (rows, status) = app.get_json(&path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 0);

    let filtered = format!("/dashboard/invoices?query=evil&page={}", i64::MAX);
    let (rows, status) = app.get_json(&filtered).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn filter_matches_customer_name_case_insensitively() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, status) = app.get_json("/dashboard/invoices?query=EVIL").await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["name"] == "Evil Rabbit"));
}

#[tokio::test]
async fn filter_matches_customer_email_substring() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, _) = app.get_json("/dashboard/invoices?query=lee%40robinson").await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["email"] == "lee@robinson.com"));
}

#[tokio::test]
async fn filter_treats_regex_metacharacters_literally() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    // ".*" matches every row as a pattern but no row as a literal.
    let (rows, status) = app.get_json("/dashboard/invoices?query=.%2A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn status_filter_narrows_to_one_state() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, _) = app.get_json("/dashboard/invoices?status=paid").await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r["status"] == "paid"));

    let (pages, _) = app.get_json("/dashboard/invoices/pages?status=paid").await;
    assert_eq!(pages["total_pages"], 2);

    let (pages, _) = app.get_json("/dashboard/invoices/pages?status=pending").await;
    assert_eq!(pages["total_pages"], 1);
}

#[tokio::test]
async fn page_count_is_the_ceiling_of_the_filtered_count() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (pages, status) = app.get_json("/dashboard/invoices/pages").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pages["total_pages"], 3);

    let (pages, _) = app.get_json("/dashboard/invoices/pages?query=evil").await;
    assert_eq!(pages["total_pages"], 1);

    let (pages, _) = app.get_json("/dashboard/invoices/pages?query=no-such-customer").await;
    assert_eq!(pages["total_pages"], 0);
}

#[tokio::test]
async fn filtered_pagination_windows_the_filtered_set() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    // 8 paid fixtures: page 1 carries 6, page 2 the remaining 2.
    let (page1, _) = app.get_json("/dashboard/invoices?status=paid&page=1").await;
    let (page2, _) = app.get_json("/dashboard/invoices?status=paid&page=2").await;
    assert_eq!(page1.as_array().unwrap().len(), 6);
    assert_eq!(page2.as_array().unwrap().len(), 2);
    assert!(page2.as_array().unwrap().iter().all(|r| r["status"] == "paid"));
}

// ── Invoice detail ──────────────────────────────────────────────

#[tokio::test]
async fn invoice_detail_returns_raw_cents() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, _) = app.get_json("/dashboard/invoices").await;
    let id = rows[0]["id"].as_str().unwrap();

    let (detail, status) = app.get_json(&format!("/dashboard/invoices/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["id"], id);
    assert_eq!(detail["amount"], 44800);
    assert_eq!(detail["status"], "paid");
    assert!(detail["customer_id"].is_string());
}

#[tokio::test]
async fn missing_invoice_detail_is_not_found() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.get_json(&format!("/dashboard/invoices/{ABSENT_ID}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invoice not found.");
}

// ── Overview cards, latest, revenue ─────────────────────────────

#[tokio::test]
async fn cards_report_counts_and_formatted_totals() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (cards, status) = app.get_json("/dashboard/cards").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cards["numberOfInvoices"], 13);
    assert_eq!(cards["numberOfCustomers"], 6);
    assert_eq!(cards["totalPendingInvoices"], "$1,256.32");
    assert_eq!(cards["totalPaidInvoices"], "$1,006.26");
}

#[tokio::test]
async fn latest_returns_five_formatted_rows_newest_first() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, status) = app.get_json("/dashboard/invoices/latest").await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["amount"], "$448.00");
    assert_eq!(rows[0]["name"], "Michael Novotny");
    assert_eq!(rows[1]["amount"], "$5.00");
}

#[tokio::test]
async fn revenue_returns_the_monthly_rows() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, status) = app.get_json("/dashboard/revenue").await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["month"], "Jan");
    assert_eq!(rows[0]["revenue"], 2000);
    assert_eq!(rows[11]["month"], "Dec");
}

// ── Customers ───────────────────────────────────────────────────

#[tokio::test]
async fn customer_picker_is_sorted_by_name() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, status) = app.get_json("/dashboard/customers").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Amy Burns",
            "Balazs Orban",
            "Delba de Oliveira",
            "Evil Rabbit",
            "Lee Robinson",
            "Michael Novotny",
        ]
    );
}

#[tokio::test]
async fn customers_table_totals_split_by_status() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, status) = app.get_json("/dashboard/customers/table?query=evil").await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let evil = &rows[0];
    assert_eq!(evil["name"], "Evil Rabbit");
    assert_eq!(evil["total_invoices"], 3);
    assert_eq!(evil["total_pending"], "$164.61");
    assert_eq!(evil["total_paid"], "$10.00");
}

#[tokio::test]
async fn customers_table_unfiltered_lists_everyone_sorted() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (rows, _) = app.get_json("/dashboard/customers/table").await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["name"], "Amy Burns");
    // Amy: 34577 pending + 500 paid.
    assert_eq!(rows[0]["total_invoices"], 2);
    assert_eq!(rows[0]["total_pending"], "$345.77");
    assert_eq!(rows[0]["total_paid"], "$5.00");
}

// ── Revalidation ────────────────────────────────────────────────

#[tokio::test]
async fn mutations_bump_the_listing_generation() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let customer_id = app.customer_id("Evil Rabbit").await;

    assert_eq!(app.state.revalidations.generation("/dashboard/invoices"), 0);

    app.create_invoice(&customer_id, "10.00", "pending").await;
    assert_eq!(app.state.revalidations.generation("/dashboard/invoices"), 1);

    let (rows, _) = app.get_json("/dashboard/invoices").await;
    let id = rows[0]["id"].as_str().unwrap().to_string();

    app.update_invoice(&id, &customer_id, "11.00", "paid").await;
    assert_eq!(app.state.revalidations.generation("/dashboard/invoices"), 2);

    app.delete_invoice(&id).await;
    assert_eq!(app.state.revalidations.generation("/dashboard/invoices"), 3);

    // Failed mutations do not invalidate anything.
    app.create_invoice(&customer_id, "0", "pending").await;
    assert_eq!(app.state.revalidations.generation("/dashboard/invoices"), 3);
}
