use sheetlink_model::{AccountSession, FileUploadStatus};
use sheetlink_onboard::{NavigationMode, SetupFlow, SetupStep, StepTracker};

fn session(profile: bool, linked: bool, sheet: bool) -> AccountSession {
    AccountSession {
        profile_configured: profile,
        google_linked: linked,
        sheet_configured: sheet,
        ..AccountSession::default()
    }
}

fn upload_session(profile: bool, files_complete: bool) -> AccountSession {
    AccountSession {
        profile_configured: profile,
        upload_status: Some(FileUploadStatus {
            has_purchases: files_complete,
            has_inventory: files_complete,
            files_complete,
        }),
        ..AccountSession::default()
    }
}

#[test]
fn profile_done_but_unlinked_lands_on_account_link() {
    let session = session(true, false, false);
    let tracker = StepTracker::for_session(SetupFlow::for_session(&session), &session);
    assert_eq!(tracker.current_step(), Some(SetupStep::AccountLink));
}

#[test]
fn sheet_config_is_unreachable_until_account_is_linked() {
    let session = session(true, false, false);
    let mut tracker = StepTracker::for_session(SetupFlow::standard(), &session);

    assert!(!tracker.navigate_to(3, &session));
    assert_eq!(tracker.current_step(), Some(SetupStep::AccountLink));
    assert_eq!(tracker.mode(), NavigationMode::Auto);
}

#[test]
fn tracker_follows_completion_across_refreshes() {
    let mut tracker =
        StepTracker::for_session(SetupFlow::standard(), &session(false, false, false));
    assert_eq!(tracker.current_ordinal(), 1);

    // Server confirms the profile save; the next refresh advances the step.
    tracker.sync(&session(true, false, false));
    assert_eq!(tracker.current_step(), Some(SetupStep::AccountLink));

    tracker.sync(&session(true, true, false));
    assert_eq!(tracker.current_step(), Some(SetupStep::SheetConfig));

    tracker.sync(&session(true, true, true));
    assert_eq!(tracker.current_step(), Some(SetupStep::SheetConfig));
}

#[test]
fn manual_selection_survives_refresh_until_resumed() {
    let mid = session(true, false, false);
    let mut tracker = StepTracker::for_session(SetupFlow::standard(), &mid);
    assert!(tracker.navigate_to(1, &mid));

    let linked = session(true, true, false);
    tracker.sync(&linked);
    assert_eq!(tracker.current_ordinal(), 1);

    tracker.resume_auto(&linked);
    assert_eq!(tracker.current_step(), Some(SetupStep::SheetConfig));
}

#[test]
fn upload_accounts_get_the_four_step_flow() {
    let session = upload_session(true, false);
    let flow = SetupFlow::for_session(&session);
    assert_eq!(flow.len(), 4);
    assert_eq!(flow.ordinal_of(SetupStep::FileUpload), Some(2));

    let tracker = StepTracker::for_session(flow, &session);
    assert_eq!(tracker.current_step(), Some(SetupStep::FileUpload));
}

#[test]
fn upload_flow_advances_once_files_are_in() {
    let mut tracker =
        StepTracker::for_session(SetupFlow::with_file_upload(), &upload_session(true, false));
    assert_eq!(tracker.current_ordinal(), 2);

    tracker.sync(&upload_session(true, true));
    assert_eq!(tracker.current_step(), Some(SetupStep::AccountLink));
    assert_eq!(tracker.current_ordinal(), 3);
}

#[test]
fn mapping_review_reads_as_step_three_and_a_half() {
    let ready = session(true, true, false);
    let mut tracker = StepTracker::for_session(SetupFlow::standard(), &ready);
    assert_eq!(tracker.current_step(), Some(SetupStep::SheetConfig));

    assert!(tracker.enter_mapping_review());
    assert_eq!(tracker.display_ordinal(), 3.5);

    // Leaving review lands back on the configuration form, not a new step.
    tracker.leave_mapping_review();
    assert_eq!(tracker.display_ordinal(), 3.0);
    assert_eq!(tracker.current_step(), Some(SetupStep::SheetConfig));
}

#[test]
fn descriptors_serialize_with_snake_case_steps() {
    let state = session(true, false, false);
    let tracker = StepTracker::for_session(SetupFlow::standard(), &state);
    let rows = tracker.steps(&state, true);

    let value = serde_json::to_value(&rows).unwrap();
    assert_eq!(value[0]["ordinal"], 1);
    assert_eq!(value[0]["step"], "profile");
    assert_eq!(value[0]["completed"], true);
    assert_eq!(value[1]["step"], "account_link");
    assert_eq!(value[1]["active"], true);
}

#[test]
fn descriptor_rows_match_flow_order() {
    let state = session(true, true, false);
    let tracker = StepTracker::for_session(SetupFlow::standard(), &state);
    let rows = tracker.steps(&state, true);

    let labels: Vec<&str> = rows.iter().map(|row| row.label).collect();
    assert_eq!(
        labels,
        vec!["Business Profile", "Link Google Account", "Configure Sheet"]
    );
    assert_eq!(rows.iter().filter(|row| row.active).count(), 1);
    assert!(rows[2].active);
}
