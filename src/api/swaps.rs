use axum::Json;
use axum::extract::{Path, State};

use crate::auth::{SessionUser, can_mutate};
use crate::db;
use crate::error::AppError;
use crate::models::{
    Deleted, NewSwapRequest, PublicSwapListing, REQUEST_ACCEPTED, REQUEST_PENDING,
    REQUEST_REJECTED, RequestInbox, SendSwapRequest, Swap, SwapListing, SwapRequest,
    UpdateSwapRequestBody, group_asked_sections,
};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<NewSwapRequest>,
) -> Result<Json<Swap>, AppError> {
    if req.asking_section.is_empty() {
        return Err(AppError::BadRequest("askingSection must not be empty".to_string()));
    }

    let swap = db::swaps::insert(
        &state.db,
        &session.email,
        req.giving_section,
        &req.asking_section,
        &state.config.current_semester,
    )
    .await?;

    Ok(Json(swap))
}

pub async fn list(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<SwapListing>>, AppError> {
    let swaps = db::swaps::fetch_open(&state.db).await?;
    let asked = db::swaps::fetch_asked_sections(&state.db).await?;
    let mut grouped = group_asked_sections(asked);

    let listings = swaps
        .into_iter()
        .map(|swap| {
            let asking_sections = grouped.remove(&swap.id).unwrap_or_default();
            let is_owner = swap.email == session.email;
            SwapListing {
                id: swap.id,
                u_email: swap.email,
                get_section_id: swap.get_section_id,
                asking_sections,
                is_done: swap.is_done,
                is_owner,
                semester: swap.semester,
                created_at: swap.created_at,
            }
        })
        .collect();

    Ok(Json(listings))
}

/// Anonymized board: no offerer email, no ownership flag, no session needed.
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicSwapListing>>, AppError> {
    let swaps = db::swaps::fetch_open(&state.db).await?;
    let asked = db::swaps::fetch_asked_sections(&state.db).await?;
    let mut grouped = group_asked_sections(asked);

    let listings = swaps
        .into_iter()
        .map(|swap| PublicSwapListing {
            asking_sections: grouped.remove(&swap.id).unwrap_or_default(),
            id: swap.id,
            get_section_id: swap.get_section_id,
            is_done: swap.is_done,
            semester: swap.semester,
            created_at: swap.created_at,
        })
        .collect();

    Ok(Json(listings))
}

/// Idempotent: marking an already-done offer succeeds the same way.
pub async fn mark_done(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<Swap>, AppError> {
    let swap = db::swaps::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    can_mutate(Some(&session), &swap.email).require()?;

    db::swaps::mark_done(&state.db, &id).await?;
    Ok(Json(Swap {
        is_done: true,
        ..swap
    }))
}

pub async fn remove(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let swap = db::swaps::find_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    can_mutate(Some(&session), &swap.email).require()?;

    db::swaps::delete(&state.db, &id).await?;
    Ok(Json(Deleted { id }))
}

pub async fn send_request(
    State(state): State<AppState>,
    session: SessionUser,
    Json(req): Json<SendSwapRequest>,
) -> Result<Json<SwapRequest>, AppError> {
    let swap = db::swaps::find_by_id(&state.db, &req.swap_id)
        .await?
        .filter(|swap| !swap.is_done)
        .ok_or(AppError::NotFound)?;

    if swap.email == session.email {
        return Err(AppError::BadRequest("Cannot request your own swap".to_string()));
    }

    if db::swaps::find_pending_request(&state.db, &swap.id, &session.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A pending request for this swap already exists".to_string(),
        ));
    }

    let request =
        db::swaps::insert_request(&state.db, &swap.id, &session.email, &swap.email).await?;
    Ok(Json(request))
}

pub async fn list_requests(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<RequestInbox>, AppError> {
    let incoming = db::swaps::fetch_incoming(&state.db, &session.email).await?;
    let outgoing = db::swaps::fetch_outgoing(&state.db, &session.email).await?;
    Ok(Json(RequestInbox { incoming, outgoing }))
}

pub async fn update_request(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateSwapRequestBody>,
) -> Result<Json<SwapRequest>, AppError> {
    // Validation precedes any lookup: a bad status against a nonexistent id
    // is still a 400.
    if body.status != REQUEST_ACCEPTED && body.status != REQUEST_REJECTED {
        return Err(AppError::BadRequest(
            "status must be ACCEPTED or REJECTED".to_string(),
        ));
    }

    // Scoped to the receiver: a request addressed to someone else is
    // indistinguishable from a missing one.
    let request = db::swaps::find_request_for_receiver(&state.db, &id, &session.email)
        .await?
        .ok_or(AppError::NotFound)?;

    if request.status != REQUEST_PENDING {
        return Err(AppError::Conflict("Request already resolved".to_string()));
    }

    db::swaps::update_request_status(&state.db, &id, &body.status).await?;

    Ok(Json(SwapRequest {
        status: body.status,
        is_read: false,
        ..request
    }))
}

pub async fn mark_request_read(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<SwapRequest>, AppError> {
    let request = db::swaps::find_request_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    // The unread marker belongs to whoever is being notified: the receiver
    // while pending, the sender once resolved. Anyone else gets the same
    // 404 as a missing id.
    let audience = if request.status == REQUEST_PENDING {
        &request.receiver_email
    } else {
        &request.sender_email
    };
    if audience != &session.email {
        return Err(AppError::NotFound);
    }

    db::swaps::mark_request_read(&state.db, &id).await?;
    Ok(Json(SwapRequest {
        is_read: true,
        ..request
    }))
}
