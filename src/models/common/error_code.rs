//! 业务错误码
//!
//! 前两位对应 HTTP 状态码，后三位为业务内细分。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400
    BadRequest = 40000,
    MarksOutOfRange = 40001,
    InvalidEvaluationType = 40002,
    InvalidDefenseType = 40003,

    // 401
    Unauthorized = 40100,
    AuthFailed = 40101,

    // 403
    Forbidden = 40300,
    EvaluationPermissionDenied = 40301,

    // 404
    NotFound = 40400,
    UserNotFound = 40401,
    ProposalNotFound = 40402,
    BoardNotFound = 40403,
    ResultNotFound = 40404,

    // 409
    ResultAlreadyPublished = 40900,

    // 500
    InternalServerError = 50000,
}
