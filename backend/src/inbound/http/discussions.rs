//! Discussion thread and comment HTTP handlers.
//!
//! Threads and comments record the caller as their creator; only that caller
//! may later update or delete them.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CreateCommentRequest, CreateThreadRequest, UpdateCommentRequest, UpdateThreadRequest,
};
use crate::domain::{
    CapsuleId, CommentDetail, CommentFilter, CommentId, Error, ProfileId, ThreadDetail,
    ThreadFilter, ThreadId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{
    ErrorSchema, NestedCapsuleBody, NestedThreadBody, ProfileBody, timestamp,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RawId, parse_id_filter, parse_optional_id, parse_required_id, require,
};

const CAPSULE: FieldName = FieldName::new("capsule");
const TITLE: FieldName = FieldName::new("title");
const CREATED_BY: FieldName = FieldName::new("created_by");
const THREAD: FieldName = FieldName::new("thread");
const CONTENT: FieldName = FieldName::new("content");
const AUTHOR: FieldName = FieldName::new("author");

/// Request payload for opening or overwriting a thread.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ThreadRequestBody {
    #[schema(value_type = Option<i64>)]
    pub capsule: Option<RawId>,
    pub title: Option<String>,
}

/// Request payload for posting or overwriting a comment.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentRequestBody {
    #[schema(value_type = Option<i64>)]
    pub thread: Option<RawId>,
    pub content: Option<String>,
}

/// Query filters for listing threads.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ThreadQuery {
    /// Only threads about this capsule.
    pub capsule: Option<String>,
    /// Only threads opened by this profile.
    pub created_by: Option<String>,
}

impl ThreadQuery {
    fn into_filter(self) -> Result<ThreadFilter, Error> {
        Ok(ThreadFilter {
            capsule: parse_id_filter(self.capsule.as_deref(), CAPSULE)?.map(CapsuleId::new),
            created_by: parse_id_filter(self.created_by.as_deref(), CREATED_BY)?
                .map(ProfileId::new),
        })
    }
}

/// Query filters for listing comments.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CommentQuery {
    /// Only comments in this thread.
    pub thread: Option<String>,
    /// Only comments by this profile.
    pub author: Option<String>,
}

impl CommentQuery {
    fn into_filter(self) -> Result<CommentFilter, Error> {
        Ok(CommentFilter {
            thread: parse_id_filter(self.thread.as_deref(), THREAD)?.map(ThreadId::new),
            author: parse_id_filter(self.author.as_deref(), AUTHOR)?.map(ProfileId::new),
        })
    }
}

/// Discussion thread projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ThreadBody {
    pub id: i64,
    pub capsule: NestedCapsuleBody,
    pub title: String,
    pub created_by: ProfileBody,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub comment_count: u64,
}

impl From<ThreadDetail> for ThreadBody {
    fn from(value: ThreadDetail) -> Self {
        let ThreadDetail {
            thread,
            capsule,
            created_by,
            comment_count,
        } = value;
        Self {
            id: thread.id.get(),
            capsule: capsule.into(),
            title: thread.title,
            created_by: created_by.into(),
            created_at: timestamp(thread.created_at),
            comment_count,
        }
    }
}

/// Discussion comment projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CommentBody {
    pub id: i64,
    pub thread: NestedThreadBody,
    pub content: String,
    pub author: ProfileBody,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<CommentDetail> for CommentBody {
    fn from(value: CommentDetail) -> Self {
        let CommentDetail {
            comment,
            thread,
            author,
        } = value;
        Self {
            id: comment.id.get(),
            thread: thread.into(),
            content: comment.content,
            author: author.into(),
            created_at: timestamp(comment.created_at),
        }
    }
}

/// List threads, newest first.
#[utoipa::path(
    get,
    path = "/discussionthreads",
    params(ThreadQuery),
    responses(
        (status = 200, description = "Discussion threads", body = [ThreadBody]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "listDiscussionThreads"
)]
#[get("/discussionthreads")]
pub async fn list_threads(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<ThreadQuery>,
) -> ApiResult<web::Json<Vec<ThreadBody>>> {
    let filter = query.into_inner().into_filter()?;
    let threads = state.discussions.list_threads(filter).await?;
    Ok(web::Json(threads.into_iter().map(ThreadBody::from).collect()))
}

/// Fetch one thread.
#[utoipa::path(
    get,
    path = "/discussionthreads/{id}",
    params(("id" = i64, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Discussion thread", body = ThreadBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "getDiscussionThread"
)]
#[get("/discussionthreads/{id:\\d+}")]
pub async fn get_thread(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ThreadBody>> {
    let thread = state
        .discussions
        .get_thread(ThreadId::new(path.into_inner()))
        .await?;
    Ok(web::Json(thread.into()))
}

/// Open a thread on a capsule.
#[utoipa::path(
    post,
    path = "/discussionthreads",
    request_body = ThreadRequestBody,
    responses(
        (status = 201, description = "Thread created", body = ThreadBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown capsule", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "createDiscussionThread"
)]
#[post("/discussionthreads")]
pub async fn create_thread(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<ThreadRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = CreateThreadRequest {
        capsule: CapsuleId::new(parse_required_id(body.capsule, CAPSULE)?),
        title: require(body.title, TITLE)?,
        created_by: caller.id(),
    };
    let thread = state.discussions.create_thread(request).await?;
    Ok(HttpResponse::Created().json(ThreadBody::from(thread)))
}

/// Overwrite a thread the caller opened.
#[utoipa::path(
    put,
    path = "/discussionthreads/{id}",
    params(("id" = i64, Path, description = "Thread id")),
    request_body = ThreadRequestBody,
    responses(
        (status = 204, description = "Thread updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller did not open the thread", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "updateDiscussionThread"
)]
#[put("/discussionthreads/{id:\\d+}")]
pub async fn update_thread(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<ThreadRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = UpdateThreadRequest {
        id: ThreadId::new(path.into_inner()),
        caller: caller.id(),
        capsule: parse_optional_id(body.capsule, CAPSULE)?.map(CapsuleId::new),
        title: body.title,
    };
    state.discussions.update_thread(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a thread the caller opened, with its comments.
#[utoipa::path(
    delete,
    path = "/discussionthreads/{id}",
    params(("id" = i64, Path, description = "Thread id")),
    responses(
        (status = 204, description = "Thread deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller did not open the thread", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "deleteDiscussionThread"
)]
#[delete("/discussionthreads/{id:\\d+}")]
pub async fn delete_thread(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .discussions
        .delete_thread(ThreadId::new(path.into_inner()), caller.id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List comments, oldest first.
#[utoipa::path(
    get,
    path = "/discussioncomments",
    params(CommentQuery),
    responses(
        (status = 200, description = "Discussion comments", body = [CommentBody]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "listDiscussionComments"
)]
#[get("/discussioncomments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    _caller: Caller,
    query: web::Query<CommentQuery>,
) -> ApiResult<web::Json<Vec<CommentBody>>> {
    let filter = query.into_inner().into_filter()?;
    let comments = state.discussions.list_comments(filter).await?;
    Ok(web::Json(comments.into_iter().map(CommentBody::from).collect()))
}

/// Fetch one comment.
#[utoipa::path(
    get,
    path = "/discussioncomments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Discussion comment", body = CommentBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "getDiscussionComment"
)]
#[get("/discussioncomments/{id:\\d+}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    _caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CommentBody>> {
    let comment = state
        .discussions
        .get_comment(CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comment.into()))
}

/// Post a comment to a thread.
#[utoipa::path(
    post,
    path = "/discussioncomments",
    request_body = CommentRequestBody,
    responses(
        (status = 201, description = "Comment created", body = CommentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown thread", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "createDiscussionComment"
)]
#[post("/discussioncomments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CommentRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = CreateCommentRequest {
        thread: ThreadId::new(parse_required_id(body.thread, THREAD)?),
        content: require(body.content, CONTENT)?,
        author: caller.id(),
    };
    let comment = state.discussions.create_comment(request).await?;
    Ok(HttpResponse::Created().json(CommentBody::from(comment)))
}

/// Overwrite a comment the caller wrote.
#[utoipa::path(
    put,
    path = "/discussioncomments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = CommentRequestBody,
    responses(
        (status = 204, description = "Comment updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller did not write the comment", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "updateDiscussionComment"
)]
#[put("/discussioncomments/{id:\\d+}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
    payload: web::Json<CommentRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let request = UpdateCommentRequest {
        id: CommentId::new(path.into_inner()),
        caller: caller.id(),
        thread: parse_optional_id(body.thread, THREAD)?.map(ThreadId::new),
        content: body.content,
    };
    state.discussions.update_comment(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a comment the caller wrote.
#[utoipa::path(
    delete,
    path = "/discussioncomments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller did not write the comment", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["discussions"],
    operation_id = "deleteDiscussionComment"
)]
#[delete("/discussioncomments/{id:\\d+}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .discussions
        .delete_comment(CommentId::new(path.into_inner()), caller.id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
