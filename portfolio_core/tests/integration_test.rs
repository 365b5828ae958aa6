use portfolio_core::{
    ui::{FieldVisual, NotificationKind},
    AppConfig, FieldName, RecordingUi, Site, SubmissionOutcome, SubmissionState, UiSignal,
    Validity,
};
use std::sync::Arc;
use std::time::Duration;

fn setup_site() -> (Arc<RecordingUi>, Site) {
    let ui = Arc::new(RecordingUi::new());
    let site = Site::new(&AppConfig::default(), ui.clone());
    (ui, site)
}

#[tokio::test(start_paused = true)]
async fn test_successful_submission_lifecycle() {
    let (ui, site) = setup_site();
    let form = site.form.clone();

    form.on_field_blur(FieldName::Name, "Al");
    form.on_field_blur(FieldName::Email, "al@x.co");
    form.on_field_blur(FieldName::Subject, "Hi there");
    form.on_field_blur(FieldName::Message, "This is ten+");
    assert_eq!(form.submission_state(), SubmissionState::Idle);
    ui.take_form_signals();

    let submitting = form.clone();
    let handle = tokio::spawn(async move { submitting.submit().await });

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(form.submission_state(), SubmissionState::Submitting);
    assert!(ui.form_signals().contains(&UiSignal::SubmitBusy {
        busy: true,
        label: "Sending...".to_string(),
    }));

    assert_eq!(handle.await.unwrap(), SubmissionOutcome::Succeeded);
    assert_eq!(form.submission_state(), SubmissionState::Succeeded);

    for field in FieldName::ALL {
        let state = form.field_state(field);
        assert_eq!(state.validity, Validity::Unvalidated);
        assert!(state.value.is_empty());
        assert!(state.error_message.is_empty());
    }

    let signals = ui.form_signals();
    let banner = signals
        .iter()
        .find_map(|s| match s {
            UiSignal::BannerShown(n) => Some(n.clone()),
            _ => None,
        })
        .expect("success banner should be shown");
    assert_eq!(banner.kind, NotificationKind::Success);
    assert_eq!(banner.text, "Thank you! Your message has been sent successfully.");
    assert!(signals.contains(&UiSignal::FormReset));
    assert!(signals.contains(&UiSignal::FieldVisual {
        field: FieldName::Message,
        input_id: "message".to_string(),
        visual: FieldVisual::Neutral,
    }));
    assert_eq!(
        signals.last(),
        Some(&UiSignal::SubmitBusy {
            busy: false,
            label: "Send Message".to_string(),
        })
    );

    tokio::time::sleep(Duration::from_millis(4900)).await;
    assert_eq!(form.submission_state(), SubmissionState::Succeeded);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(form.submission_state(), SubmissionState::Idle);
    assert_eq!(
        ui.form_signals().last(),
        Some(&UiSignal::BannerDismissed { id: banner.id })
    );
}

#[tokio::test(start_paused = true)]
async fn test_submission_with_empty_message_is_rejected() {
    let (ui, site) = setup_site();
    let form = &site.form;

    form.on_field_input(FieldName::Name, "Al");
    form.on_field_input(FieldName::Email, "al@x.co");
    form.on_field_input(FieldName::Subject, "Hi there");

    assert!(!form.validate_form());
    assert_eq!(form.submit().await, SubmissionOutcome::Invalid);

    let message = form.field_state(FieldName::Message);
    assert_eq!(message.validity, Validity::Invalid);
    assert_eq!(message.error_message, "Message is required");
    assert_eq!(form.submission_state(), SubmissionState::Idle);

    let signals = ui.form_signals();
    assert!(!signals.iter().any(|s| matches!(s, UiSignal::SubmitBusy { .. })));
    assert!(!signals.iter().any(|s| matches!(s, UiSignal::BannerShown(_))));
}

#[tokio::test(start_paused = true)]
async fn test_double_submit_sends_once() {
    let (ui, site) = setup_site();
    let form = &site.form;

    form.on_field_input(FieldName::Name, "Al");
    form.on_field_input(FieldName::Email, "al@x.co");
    form.on_field_input(FieldName::Subject, "Hi there");
    form.on_field_input(FieldName::Message, "This is ten+");

    let (first, second) = tokio::join!(form.submit(), form.submit());
    assert_eq!(first, SubmissionOutcome::Succeeded);
    assert_eq!(second, SubmissionOutcome::Ignored);

    let busy = ui
        .form_signals()
        .into_iter()
        .filter(|s| matches!(s, UiSignal::SubmitBusy { busy: true, .. }))
        .count();
    assert_eq!(busy, 1);
}

#[test]
fn test_validate_field_ignores_prior_state() {
    let (_, site) = setup_site();
    let form = &site.form;

    let cases = [
        (FieldName::Email, "a@b.co", true),
        (FieldName::Email, "a@b", false),
        (FieldName::Email, "abc", false),
        (FieldName::Email, "a.b+c@sub.domain.org", true),
        (FieldName::Name, "A", false),
        (FieldName::Name, "Al", true),
        (FieldName::Message, "123456789", false),
        (FieldName::Message, "1234567890", true),
    ];

    for _ in 0..2 {
        for (field, value, expected) in cases {
            assert_eq!(
                form.validate_field(field, value).valid,
                expected,
                "{} = {:?}",
                field,
                value
            );
        }
    }
}
