//! 下单页面的完整流程测试
//!
//! 页面组件的事件处理只是把 `OrderScreen` 的返回值交给 `ApiClient`，
//! 这里用同样的方式驱动状态机，并用 mock 传输层记录实际发出的请求。

use std::collections::BTreeSet;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use super::*;
use crate::client::tests::{setup, TestClient};
use crate::error::{ApiError, FieldMessages};
use crate::model::{DesignCodeOption, SizeSlot, TitledOption};
use crate::order::numeric::{is_rejected_key, parse_count, sanitize_count};
use crate::protocol::ApiRequest;

// =========================================================
// Helpers
// =========================================================

fn ready_screen() -> OrderScreen {
    let catalog = Catalog {
        design_types: Ok(vec![TitledOption {
            id: 3,
            title: "Flush".into(),
        }]),
        finishings: Ok(vec![TitledOption {
            id: 7,
            title: "Matte".into(),
        }]),
        panel_sizes: Ok(vec![SizeSlot {
            id: 2,
            size: "7x3".into(),
        }]),
        a_section_sizes: Ok(vec![
            SizeSlot {
                id: 21,
                size: "4in".into(),
            },
            SizeSlot {
                id: 22,
                size: "6in".into(),
            },
        ]),
        ..Catalog::default()
    };
    let mut screen = OrderScreen::new();
    screen.finish_loading(catalog);
    screen
}

fn fill_line(screen: &mut OrderScreen, nos: u32) {
    screen.select_design_type(Some(3));
    screen.select_finishing(Some(7));
    screen.select_panel_size(Some(2));
    screen.select_design_no(Some(5));
    screen.set_nos(Some(nos));
}

fn fill_customer(screen: &mut OrderScreen) {
    screen.set_customer_name("Acme".into());
    screen.set_delivery_date(NaiveDate::from_ymd_opt(2025, 1, 10));
}

/// 与页面的提交处理器相同：通过前置检查才发请求
async fn submit(screen: &mut OrderScreen, client: &TestClient) -> Result<SubmitOutcome, SubmitBlocked> {
    let payload = screen.begin_submit()?;
    let result = client.call(&payload).await;
    Ok(screen.finish_submit(result))
}

// =========================================================
// Line items
// =========================================================

#[test]
fn append_assigns_sequential_ids() {
    let mut screen = ready_screen();
    for expected in 1..=3 {
        let before = screen.draft().saved().len();
        fill_line(&mut screen, expected * 2);
        assert_eq!(screen.add_line_item(), Ok(expected));
        assert_eq!(screen.draft().saved().len(), before + 1);
        assert_eq!(screen.draft().saved()[before].id, before as u32 + 1);
    }
}

#[test]
fn rejected_append_reports_exactly_the_missing_fields() {
    let cases: [(fn(&mut OrderScreen), BTreeSet<LineItemField>); 3] = [
        (|_: &mut OrderScreen| {}, LineItemField::REQUIRED.into_iter().collect()),
        (
            |s: &mut OrderScreen| {
                s.select_design_type(Some(3));
                s.set_nos(Some(4));
            },
            BTreeSet::from([
                LineItemField::DesignNo,
                LineItemField::PanelSize,
                LineItemField::Finishing,
            ]),
        ),
        (
            |s: &mut OrderScreen| {
                fill_line(s, 1);
                s.set_nos(Some(0));
            },
            BTreeSet::from([LineItemField::Nos]),
        ),
    ];

    for (fill, expected) in cases {
        let mut screen = ready_screen();
        fill(&mut screen);
        let draft_before = screen.draft().current.clone();

        let err = screen.add_line_item().unwrap_err();
        assert_eq!(err, AddBlocked::MissingFields(MissingFields(expected.clone())));
        assert_eq!(screen.draft().line_errors(), &expected);
        assert!(screen.draft().saved().is_empty());
        // 用户的部分输入保留
        assert_eq!(screen.draft().current, draft_before);
        assert_eq!(screen.phase(), ScreenPhase::ValidationError);
    }
}

#[test]
fn successful_append_carries_selections_and_clears_quantities() {
    let mut screen = ready_screen();
    fill_line(&mut screen, 10);
    screen.set_a_section(21, Some(4));
    screen.set_frame(31, Some(2));
    screen.add_line_item().unwrap();

    let next = &screen.draft().current;
    assert_eq!(next.design_type, Some(3));
    assert_eq!(next.finishing, Some(7));
    assert_eq!(next.panel_size, Some(2));
    assert_eq!(next.design_no, Some(5));
    assert_eq!(next.nos, None);
    assert!(next.a_section.is_empty());
    assert!(next.frame.is_empty());
    assert!(screen.draft().line_errors().is_empty());
}

#[test]
fn editing_a_field_clears_its_error_and_leaves_validation_state() {
    let mut screen = ready_screen();
    screen.add_line_item().unwrap_err();
    assert!(screen.line_error(LineItemField::Finishing).is_some());

    screen.select_finishing(Some(7));
    assert_eq!(screen.line_error(LineItemField::Finishing), None);
    assert!(screen.line_error(LineItemField::DesignType).is_some());
    assert_eq!(screen.phase(), ScreenPhase::Ready);
}

// =========================================================
// Numeric input
// =========================================================

#[test]
fn keystrokes_never_leave_rejected_characters_in_quantities() {
    let sequences = ["1e3", "-5", "+2", "3.5", "E", "12e+4-.", "40"];
    for seq in sequences {
        // 按键阶段：被拦截的字符不会进入输入框
        let mut value = String::new();
        for ch in seq.chars() {
            let key = ch.to_string();
            if !is_rejected_key(&key) {
                value.push(ch);
                value = sanitize_count(&value);
            }
        }
        assert!(!value.contains(['e', 'E', '+', '-', '.']), "{seq} -> {value}");

        let mut screen = ready_screen();
        screen.set_nos(parse_count(&value));
        screen.set_a_section(21, parse_count(&value));
        let current = &screen.draft().current;
        assert_eq!(current.nos, value.parse().ok());
    }
}

// =========================================================
// Design codes
// =========================================================

#[test]
fn out_of_order_design_code_responses_keep_the_latest_pair() {
    let mut screen = ready_screen();
    let by_type = screen.select_design_type(Some(3));
    let by_pair = screen.select_finishing(Some(7));
    assert_eq!(
        by_pair.request().path(),
        "/sales/get-designs/3/7".to_string()
    );

    let fresh = vec![DesignCodeOption {
        id: 5,
        design_code: "DX-5".into(),
    }];
    let stale = vec![DesignCodeOption {
        id: 9,
        design_code: "OLD-9".into(),
    }];

    assert!(screen.accept_design_codes(by_pair, Ok(fresh.clone())));
    assert!(!screen.accept_design_codes(by_type, Ok(stale)));
    assert_eq!(screen.design_codes().codes(), fresh.as_slice());
    assert_eq!(screen.design_code_label(5), "DX-5");
    // 过期响应里的编号不进入预览标签
    assert_eq!(screen.design_code_label(9), "N/A");
}

#[test]
fn preview_labels_fall_back_to_placeholder() {
    let screen = ready_screen();
    assert_eq!(screen.design_type_label(3), "Flush");
    assert_eq!(screen.finishing_label(99), "N/A");
    assert_eq!(screen.panel_size_label(2), "7x3");
    assert_eq!(screen.design_code_label(5), "N/A");
}

// =========================================================
// Submission
// =========================================================

#[tokio::test]
async fn submitting_without_line_items_sends_nothing() {
    let (transport, _session, client) = setup();

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    let blocked = submit(&mut screen, &client).await.unwrap_err();
    assert_eq!(blocked, SubmitBlocked::NoLineItems);

    let mut screen = ready_screen();
    let blocked = submit(&mut screen, &client).await.unwrap_err();
    assert!(matches!(blocked, SubmitBlocked::MissingCustomerFields(_)));

    assert!(transport.sent.borrow().is_empty());
}

#[tokio::test]
async fn scenario_single_line_with_a_section_quantity() {
    let mut screen = ready_screen();
    fill_line(&mut screen, 10);
    screen.set_a_section(21, Some(4));
    screen.add_line_item().unwrap();

    let saved = &screen.draft().saved()[0];
    assert_eq!(saved.id, 1);
    assert_eq!(saved.a_section, QuantityMap::from([(21, 4)]));

    let current = &screen.draft().current;
    assert_eq!(
        (current.design_type, current.finishing, current.panel_size, current.design_no),
        (Some(3), Some(7), Some(2), Some(5))
    );
    assert_eq!(current.nos, None);
    assert!(current.a_section.is_empty() && current.frame.is_empty());
}

#[test]
fn scenario_missing_finishing_blocks_append() {
    let mut screen = ready_screen();
    screen.select_design_type(Some(3));

    let err = screen.add_line_item().unwrap_err();
    assert_eq!(err.to_string(), "Please fill in all required fields!");
    assert_eq!(
        screen.draft().line_errors(),
        &BTreeSet::from([
            LineItemField::DesignNo,
            LineItemField::PanelSize,
            LineItemField::Finishing,
            LineItemField::Nos,
        ])
    );
    assert!(screen.draft().saved().is_empty());
}

#[tokio::test]
async fn scenario_two_lines_submitted_in_one_request() {
    let (transport, _session, client) = setup();
    transport.reply(200, r#"{"success": true, "message": "Order created"}"#);

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 10);
    screen.add_line_item().unwrap();
    screen.set_nos(Some(6));
    screen.add_line_item().unwrap();

    let outcome = submit(&mut screen, &client).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Created {
            message: "Order created".into()
        }
    );
    assert_eq!(outcome.notice().as_deref(), Some("Order created"));
    assert_eq!(screen.phase(), ScreenPhase::Submitted);
    assert!(screen.draft().saved().is_empty());

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/api/sales/order/create");
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["customerName"], "Acme");
    assert_eq!(body["deliveryDate"], "2025-01-10");
    assert_eq!(body["designs"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["designs"][1]["id"], 2);
    assert_eq!(body["designs"][1]["nos"], 6);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_refused() {
    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 1);
    screen.add_line_item().unwrap();

    assert!(screen.begin_submit().is_ok());
    assert!(screen.is_submitting());
    assert_eq!(screen.begin_submit(), Err(SubmitBlocked::AlreadySubmitting));
    assert_eq!(SubmitBlocked::AlreadySubmitting.notice(), None);
}

#[tokio::test]
async fn lines_cannot_be_added_while_the_order_is_in_flight() {
    let (transport, _session, client) = setup();
    transport.reply(200, r#"{"success": true, "message": "ok"}"#);

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 1);
    screen.add_line_item().unwrap();

    let payload = screen.begin_submit().unwrap();
    fill_line(&mut screen, 4);
    let blocked = screen.add_line_item().unwrap_err();
    assert_eq!(blocked, AddBlocked::Locked);
    assert_eq!(blocked.notice(), None);
    assert_eq!(screen.draft().saved().len(), 1);
    assert_eq!(screen.phase(), ScreenPhase::Submitting);

    let outcome = screen.finish_submit(client.call(&payload).await);
    assert_eq!(outcome, SubmitOutcome::Created { message: "ok".into() });
    assert_eq!(screen.add_line_item(), Err(AddBlocked::Locked));
    assert!(screen.draft().saved().is_empty());
}

#[tokio::test]
async fn field_errors_from_server_are_mapped_and_draft_kept() {
    let (transport, session, client) = setup();
    transport.reply(
        422,
        r#"{"errors": {"deliveryDate": ["The delivery date must be after today."], "nos": ["Too many"]}}"#,
    );

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 3);
    screen.add_line_item().unwrap();

    let outcome = submit(&mut screen, &client).await.unwrap();
    let mut expected = FieldMessages::new();
    expected.insert("deliveryDate".into(), "The delivery date must be after today.".into());
    expected.insert("nos".into(), "Too many".into());
    assert_eq!(outcome, SubmitOutcome::FieldErrors(expected));
    assert_eq!(outcome.notice(), None);

    assert_eq!(screen.phase(), ScreenPhase::SubmissionError);
    assert_eq!(screen.draft().saved().len(), 1);
    assert_eq!(
        screen.customer_error(CustomerField::DeliveryDate).as_deref(),
        Some("The delivery date must be after today.")
    );
    assert_eq!(
        screen.line_error(LineItemField::Nos).as_deref(),
        Some("Too many")
    );
    assert_eq!(session.expired.get(), 0);

    // 修改日期后错误消失，可以再次提交
    screen.set_delivery_date(NaiveDate::from_ymd_opt(2025, 2, 1));
    assert_eq!(screen.customer_error(CustomerField::DeliveryDate), None);
    assert_eq!(screen.phase(), ScreenPhase::Ready);
    assert!(screen.begin_submit().is_ok());
}

#[tokio::test]
async fn server_errors_without_a_visible_field_are_still_reported() {
    let (transport, _session, client) = setup();
    transport.reply(
        422,
        r#"{"errors": {"brand": ["brand too long"], "designs.0.nos": ["nos exceeds stock"]}}"#,
    );

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 3);
    screen.add_line_item().unwrap();

    let outcome = submit(&mut screen, &client).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::FieldErrors(_)));
    assert_eq!(screen.server_error("brand"), Some("brand too long"));
    assert_eq!(screen.unmapped_errors(), vec!["nos exceeds stock".to_string()]);

    // 品牌改动只清掉自己的错误
    screen.set_brand("Short".into());
    assert_eq!(screen.server_error("brand"), None);
    assert_eq!(screen.unmapped_errors(), vec!["nos exceeds stock".to_string()]);
}

#[tokio::test]
async fn unstructured_failures_show_generic_notice_and_keep_draft() {
    let (transport, _session, client) = setup();
    transport.reply(200, r#"{"success": false, "message": "nope"}"#);
    transport.fail_next(crate::error::TransportError::Network("offline".into()));

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 3);
    screen.add_line_item().unwrap();

    let outcome = submit(&mut screen, &client).await.unwrap();
    assert_eq!(outcome.notice().as_deref(), Some("Something went wrong"));

    let outcome = submit(&mut screen, &client).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(outcome.notice().as_deref(), Some("Server error"));
    assert_eq!(screen.draft().saved().len(), 1);
}

#[tokio::test]
async fn expired_session_during_submit_discards_the_draft() {
    let (transport, session, client) = setup();
    transport.reply(401, r#"{"message": "Unauthenticated."}"#);

    let mut screen = ready_screen();
    fill_customer(&mut screen);
    fill_line(&mut screen, 3);
    screen.add_line_item().unwrap();

    let outcome = submit(&mut screen, &client).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::SessionExpired);
    assert_eq!(session.expired.get(), 1);
    assert!(screen.draft().saved().is_empty());
}

#[test]
fn loading_is_entered_once() {
    let mut screen = OrderScreen::new();
    assert!(screen.is_loading());
    assert_eq!(screen.begin_submit(), Err(SubmitBlocked::NotReady));

    screen.finish_loading(Catalog::default());
    assert_eq!(screen.phase(), ScreenPhase::Ready);

    let late = Catalog {
        finishings: Err(crate::error::FetchError::new(
            OptionCategory::Finishings,
            ApiError::Decode("bad".into()),
        )),
        ..Catalog::default()
    };
    screen.finish_loading(late);
    assert_eq!(screen.phase(), ScreenPhase::Ready);
    assert!(screen.catalog().failures().is_empty());
}
