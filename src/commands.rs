//! One-shot CLI commands.

use std::io;
use std::sync::Arc;

use kyc::controller::{ListController, ListEvent, StatusFilter};
use kyc::progress::compute as compute_progress;
use kyc::utils::{find_level, find_user};
use kyc::{
    Action, AppState, Builtin, CountryKycAssignment, FilterCondition, KycDetail, KycLevel,
    ReorderableList, ReviewDecision, Session, User, UserKycDetail, UserKycLevel,
    PAGE_SIZE_OPTIONS,
};
use tracing::{info, warn};

use crate::cli::{ListArgs, ProgressArgs, ReorderArgs, ReviewArgs, ReviewTarget, ShowArgs};
use crate::context::Context;
use crate::error::ConsoleError;
use crate::output::{self, Tabular};

/// An entity with a list page.
pub trait Listed: Builtin + Tabular {
    /// Sort fields offered for the list; the first is the default.
    const SORT_FIELDS: &'static [&'static str];

    /// Move a row within `items`. Lists without an order return `false`.
    fn move_row(_items: &mut Vec<Self>, _from: usize, _to: usize) -> bool {
        false
    }

    /// Persist a reordered list, returning how many records were saved.
    async fn save_order(
        _ctx: &Context,
        _state: &mut AppState,
        _before: &[Self],
        _after: &[Self],
    ) -> kyc::Result<usize> {
        Err(kyc::KycError::Validation(format!(
            "{} lists have no order to save",
            Self::NAME
        )))
    }

    fn default_sort() -> &'static str {
        Self::SORT_FIELDS.first().copied().unwrap_or("id")
    }
}

impl Listed for KycLevel {
    const SORT_FIELDS: &'static [&'static str] = &["level", "name", "status", "lastUpdated"];
}

impl Listed for KycDetail {
    const SORT_FIELDS: &'static [&'static str] = &["sequence", "name", "fieldType", "status"];

    fn move_row(items: &mut Vec<Self>, from: usize, to: usize) -> bool {
        let mut list = ReorderableList::new(std::mem::take(items));
        let moved = list.move_by_index(from, to).is_some();
        *items = list.into_items();
        moved
    }

    async fn save_order(
        ctx: &Context,
        state: &mut AppState,
        before: &[Self],
        after: &[Self],
    ) -> kyc::Result<usize> {
        ctx.require_online("reordering")?;
        ctx.client.save_detail_sequence(state, before, after).await
    }
}

impl Listed for User {
    const SORT_FIELDS: &'static [&'static str] =
        &["lastName", "email", "country", "status", "createdAt"];
}

impl Listed for UserKycLevel {
    const SORT_FIELDS: &'static [&'static str] =
        &["submittedAt", "status", "level.name", "user.email"];
}

impl Listed for UserKycDetail {
    const SORT_FIELDS: &'static [&'static str] = &["createdAt", "status", "detail.name"];
}

impl Listed for CountryKycAssignment {
    const SORT_FIELDS: &'static [&'static str] = &["countryCode", "countryName", "level.name"];
}

/// Session used by the CLI's admin commands.
pub fn admin_state() -> AppState {
    let mut state = AppState::default();
    state.apply(Action::SignedIn(Session::mock_admin()));
    state
}

pub fn check_page_size(page_size: u32) -> Result<(), ConsoleError> {
    if PAGE_SIZE_OPTIONS.contains(&page_size) {
        Ok(())
    } else {
        Err(ConsoleError::Usage(format!(
            "page size must be one of {PAGE_SIZE_OPTIONS:?}, got {page_size}"
        )))
    }
}

pub fn parse_status(raw: &str) -> Result<StatusFilter, ConsoleError> {
    StatusFilter::parse(raw).map_err(|e| ConsoleError::Usage(e.to_string()))
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

pub async fn list<T: Listed>(ctx: &Context, args: &ListArgs) -> Result<(), ConsoleError> {
    check_page_size(args.page_size)?;
    let status = parse_status(&args.status)?;
    let loader = Arc::new(ctx.loader::<T>()?);

    let sort = args.sort.as_deref().unwrap_or(T::default_sort());
    let mut controller = ListController::new(Arc::clone(&loader), sort).with_page_size(args.page_size);
    if let Some(level) = &args.level {
        controller = controller.with_scope(FilterCondition::equals("levelId", level.as_str()));
    }
    if let Some(user) = &args.user {
        controller = controller.with_scope(FilterCondition::equals("userId", user.as_str()));
    }

    controller.dispatch(ListEvent::SetSearch(args.search.clone().unwrap_or_default()));
    controller.dispatch(ListEvent::SetStatusFilter(status));
    if args.desc {
        controller.dispatch(ListEvent::ToggleSortOrder);
    }
    let request = controller.dispatch(ListEvent::SetPage(args.page));
    let params = if args.all {
        request.params.fetch_all()
    } else {
        request.params
    };

    let page = loader.load_page(&params).await?;
    info!(entity = T::NAME, "{}", output::page_summary(&page, params.page));
    output::write_page(&page, args.json, &mut io::stdout().lock())
}

pub async fn show<T: Listed>(ctx: &Context, args: &ShowArgs) -> Result<(), ConsoleError> {
    let record = ctx.find::<T>(&args.id).await?;
    output::write_record(&record, args.json, &mut io::stdout().lock())
}

// ---------------------------------------------------------------------------
// review
// ---------------------------------------------------------------------------

pub async fn review(ctx: &Context, args: &ReviewArgs) -> Result<(), ConsoleError> {
    let decision = ReviewDecision::parse(&args.decision, args.comments.clone())?;
    decision.validate()?;
    ctx.require_online("reviews")?;

    let mut state = admin_state();
    let mut out = io::stdout().lock();
    match args.target {
        ReviewTarget::Level => {
            let record = ctx
                .client
                .review_user_level(&mut state, &args.id, &decision)
                .await?;
            info!(id = %record.id, status = %record.status.label(), "user level reviewed");
            output::write_record(&record, false, &mut out)
        }
        ReviewTarget::Detail => {
            let record = ctx
                .client
                .review_user_detail(&mut state, &args.id, &decision)
                .await?;
            info!(id = %record.id, status = %record.status.label(), "user detail reviewed");
            output::write_record(&record, false, &mut out)
        }
    }
}

// ---------------------------------------------------------------------------
// reorder
// ---------------------------------------------------------------------------

pub async fn reorder(ctx: &Context, args: &ReorderArgs) -> Result<(), ConsoleError> {
    let levels = ctx.all::<KycLevel>().await?;
    let level = find_level(&levels, &args.level)?;

    let before = ctx.details_for_level(&level.id).await?;
    let count = before.len();
    if args.from == 0 || args.to == 0 || args.from > count || args.to > count {
        return Err(ConsoleError::Usage(format!(
            "positions must be between 1 and {count} for level {}",
            level.name
        )));
    }

    let mut after = before.clone();
    let mut out = io::stdout().lock();
    if !KycDetail::move_row(&mut after, args.from - 1, args.to - 1) {
        info!(level = %level.name, "nothing to move");
        return output::write_rows(&before, &mut out);
    }
    output::write_rows(&after, &mut out)?;

    if args.dry_run {
        info!("dry run, order not saved");
        return Ok(());
    }
    let mut state = admin_state();
    let saved = KycDetail::save_order(ctx, &mut state, &before, &after).await?;
    info!(level = %level.name, saved, "detail order saved");
    Ok(())
}

// ---------------------------------------------------------------------------
// progress
// ---------------------------------------------------------------------------

pub async fn progress(ctx: &Context, args: &ProgressArgs) -> Result<(), ConsoleError> {
    let users = ctx.all::<User>().await?;
    let user = find_user(&users, &args.user)?;

    let remote = if ctx.offline {
        None
    } else {
        match ctx.client.verification_progress(&user.id).await {
            Ok(p) => Some(p),
            Err(e) if e.is_network() => {
                warn!(user = %user.id, error = %e, "progress lookup failed, using sample data");
                None
            }
            Err(e) => return Err(e.into()),
        }
    };
    let progress = match remote {
        Some(p) => p,
        None => compute_progress(
            &user.id,
            ctx.dataset::<KycLevel>()?.records(),
            ctx.dataset::<UserKycLevel>()?.records(),
        ),
    };

    info!(user = %user.email, percent = progress.percent, "verification progress");
    output::write_progress(&progress, args.json, &mut io::stdout().lock())
}
