use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::Table;
use tracing::{debug, info, info_span, warn};

use sheetlink_cli::input::{parse_assignment, read_headers_from_path};
use sheetlink_client::{ApiClient, ApiError, SessionPatch, SessionStore};
use sheetlink_map::{
    DetectionEngine, DraftRepository, MappingSession, ScoreThresholds, column_patterns,
    default_draft_dir,
};
use sheetlink_model::{
    AccountSession, ProfileUpdate, RequiredColumn, SheetConfigRequest, UploadKind,
};
use sheetlink_onboard::{SetupFlow, StepTracker};

use crate::cli::{ConfigureArgs, DetectArgs, LinkArgs, ProfileArgs, UploadArgs};
use crate::summary::{
    apply_table_style, print_mapping_review, print_spreadsheets, print_upload_status,
};
use crate::types::{DetectOutcome, StatusReport};

pub fn run_status(api_url: Option<&str>) -> Result<StatusReport> {
    let span = info_span!("status");
    let _guard = span.enter();
    let client = api_client(api_url)?;
    let mut store = SessionStore::new();
    let session = store.refresh(&client).map_err(friendly)?;
    let flow = SetupFlow::for_session(&session);
    let tracker = StepTracker::for_session(flow, &session);
    let steps = tracker.steps(&session, true);
    Ok(StatusReport {
        steps,
        current_ordinal: tracker.current_ordinal(),
        session,
    })
}

pub fn run_columns() {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Keywords"]);
    apply_table_style(&mut table);
    for column in RequiredColumn::ALL {
        table.add_row(vec![
            column.label().to_string(),
            column_patterns(column).join(", "),
        ]);
    }
    println!("{table}");
}

pub fn run_detect(args: &DetectArgs, api_url: Option<&str>) -> Result<DetectOutcome> {
    let span = info_span!("detect");
    let _guard = span.enter();
    let thresholds = match args.min_score {
        Some(accept) => ScoreThresholds {
            accept,
            ..ScoreThresholds::default()
        },
        None => ScoreThresholds::default(),
    };
    let engine = DetectionEngine::new(thresholds);

    if let Some(path) = &args.file {
        let headers = read_headers_from_path(path)?;
        info!(count = headers.len(), source = %path.display(), "headers read");
        let result = engine.detect(&headers);
        return Ok(DetectOutcome {
            headers,
            result,
            draft_path: None,
        });
    }

    let (Some(spreadsheet_id), Some(worksheet_title)) =
        (args.spreadsheet.as_deref(), args.worksheet.as_deref())
    else {
        bail!("provide --file, or --spreadsheet with --worksheet");
    };
    let client = api_client(api_url)?;
    let mut store = SessionStore::new();
    let session = store.refresh(&client).map_err(friendly)?;
    let headers = client
        .fetch_headers(spreadsheet_id, worksheet_title)
        .map_err(friendly)?;
    info!(
        count = headers.len(),
        spreadsheet = spreadsheet_id,
        worksheet = worksheet_title,
        "headers fetched"
    );
    let result = engine.detect(&headers);

    let draft_path = if args.save_draft {
        let repository = DraftRepository::new(default_draft_dir())?;
        let request = SheetConfigRequest {
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet_title: worksheet_title.to_string(),
            column_mapping: result.mapping.clone(),
        };
        let path = repository.save(&account_key(&session), &request, &headers)?;
        info!(path = %path.display(), "draft saved");
        Some(path)
    } else {
        None
    };

    Ok(DetectOutcome {
        headers,
        result,
        draft_path,
    })
}

pub fn run_configure(args: &ConfigureArgs, api_url: Option<&str>) -> Result<()> {
    let span = info_span!("configure");
    let _guard = span.enter();
    let client = api_client(api_url)?;
    let mut store = SessionStore::new();
    let session = store.refresh(&client).map_err(friendly)?;

    let Some(spreadsheet_id) = args.spreadsheet.clone() else {
        let spreadsheets = client.list_spreadsheets().map_err(friendly)?;
        print_spreadsheets(&spreadsheets);
        return Ok(());
    };

    let worksheet_title = match &args.worksheet {
        Some(title) => title.clone(),
        None => {
            let worksheets = client.list_worksheets(&spreadsheet_id).map_err(friendly)?;
            let Some(first) = worksheets.first() else {
                bail!("spreadsheet {spreadsheet_id} has no worksheets");
            };
            info!(worksheet = %first.title, "no worksheet given, using the first");
            first.title.clone()
        }
    };

    let headers = client
        .fetch_headers(&spreadsheet_id, &worksheet_title)
        .map_err(friendly)?;
    if headers.is_empty() {
        bail!("worksheet '{worksheet_title}' has no header row");
    }

    let account = account_key(&session);
    let repository = DraftRepository::new(default_draft_dir())?;
    let mut mapping_session = if args.from_draft {
        match repository.load(&account, &spreadsheet_id)? {
            Some(draft) => {
                if !draft.matches_headers(&headers) {
                    warn!("sheet headers changed since the draft was saved");
                }
                MappingSession::resume(headers.clone(), draft.request.column_mapping)
            }
            None => bail!("no draft found for spreadsheet {spreadsheet_id}"),
        }
    } else {
        MappingSession::new(headers.clone())
    };

    for raw in &args.map {
        let (column, header) = parse_assignment(raw)?;
        mapping_session.assign(column, &header)?;
    }

    let flow = SetupFlow::for_session(&session);
    let mut tracker = StepTracker::for_session(flow, &session);
    let review_ordinal = tracker
        .enter_mapping_review()
        .then(|| tracker.display_ordinal());
    print_mapping_review(&mapping_session, review_ordinal);

    let stale = mapping_session.stale_assignments();
    for (column, header) in &stale {
        warn!(column = %column, header = %header, "assigned header is not in the sheet");
    }

    if args.dry_run {
        info!("dry run, mapping not saved");
        return Ok(());
    }
    if !stale.is_empty() {
        bail!(
            "{} assignment(s) reference headers missing from the sheet; reassign with --map",
            stale.len()
        );
    }

    // Validates completeness and names every missing column.
    let request = mapping_session.into_request(&spreadsheet_id, &worksheet_title)?;
    let message = client.configure_sheet(&request).map_err(friendly)?;

    store.apply(SessionPatch::SheetSelection {
        spreadsheet_id: spreadsheet_id.clone(),
        worksheet_title,
    });
    store.apply(SessionPatch::SheetConfigured);
    if repository.delete(&account, &spreadsheet_id)? {
        debug!("draft removed after save");
    }

    println!("Sheet configured.");
    if let Some(message) = message {
        println!("{message}");
    }
    print_next_step(&store);
    Ok(())
}

pub fn run_profile(args: &ProfileArgs, api_url: Option<&str>) -> Result<()> {
    let span = info_span!("profile");
    let _guard = span.enter();
    let update = ProfileUpdate {
        business_name: args.business_name.clone().unwrap_or_default(),
        contact_email: args.email.clone().unwrap_or_default(),
        marketplace: args.marketplace.clone().unwrap_or_default(),
    };
    let missing = update.missing_fields();
    if !missing.is_empty() {
        bail!("missing required fields: {}", missing.join(", "));
    }

    let client = api_client(api_url)?;
    let mut store = SessionStore::new();
    store.refresh(&client).map_err(friendly)?;
    let message = client.update_profile(&update).map_err(friendly)?;
    store.apply(SessionPatch::ProfileConfigured);

    println!("Profile saved.");
    if let Some(message) = message {
        println!("{message}");
    }
    print_next_step(&store);
    Ok(())
}

pub fn run_link(args: &LinkArgs, api_url: Option<&str>) -> Result<()> {
    let span = info_span!("link");
    let _guard = span.enter();
    let client = api_client(api_url)?;
    let mut store = SessionStore::new();
    store.refresh(&client).map_err(friendly)?;
    let message = client
        .complete_google_auth(args.code.clone())
        .map_err(friendly)?;
    store.apply(SessionPatch::GoogleLinked);

    println!("Google account linked.");
    if let Some(message) = message {
        println!("{message}");
    }
    print_next_step(&store);
    Ok(())
}

pub fn run_upload(args: &UploadArgs, api_url: Option<&str>) -> Result<()> {
    let span = info_span!("upload");
    let _guard = span.enter();
    let client = api_client(api_url)?;
    let mut store = SessionStore::new();
    store.refresh(&client).map_err(friendly)?;

    if let Some(path) = &args.purchases {
        upload_seed_file(&client, UploadKind::Purchases, path)?;
    }
    if let Some(path) = &args.inventory {
        upload_seed_file(&client, UploadKind::Inventory, path)?;
    }

    let status = client.upload_status().map_err(friendly)?;
    store.apply(SessionPatch::Uploads(status));
    print_upload_status(&status);
    print_next_step(&store);
    Ok(())
}

fn upload_seed_file(client: &ApiClient, kind: UploadKind, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("seed.csv");
    info!(kind = %kind, file = file_name, bytes = bytes.len(), "uploading");
    let message = client
        .upload_file(kind, file_name, bytes)
        .map_err(friendly)?;
    println!("Uploaded {kind} file: {file_name}");
    if let Some(message) = message {
        println!("{message}");
    }
    Ok(())
}

fn api_client(api_url: Option<&str>) -> Result<ApiClient> {
    let client = match api_url {
        Some(url) => ApiClient::new(url),
        None => ApiClient::from_env(),
    }
    .map_err(friendly)?;
    debug!(base_url = client.base_url(), "backend client ready");
    Ok(client)
}

/// Log the failure detail, keep the display-ready message.
fn friendly(error: ApiError) -> anyhow::Error {
    debug!(%error, retryable = error.is_retryable(), "api request failed");
    anyhow!("{}", error.user_message())
}

/// Drafts are keyed per account; sessions without an email share one bucket.
fn account_key(session: &AccountSession) -> String {
    session
        .user_record
        .email
        .clone()
        .unwrap_or_else(|| "default".to_string())
}

fn print_next_step(store: &SessionStore) {
    let Some(session) = store.session() else {
        return;
    };
    let flow = SetupFlow::for_session(session);
    if flow.is_fully_complete(session) {
        println!("Setup complete.");
        return;
    }
    let tracker = StepTracker::for_session(flow, session);
    if let Some(step) = tracker.current_step() {
        println!("Next: step {} ({})", tracker.current_ordinal(), step.label());
    }
}
