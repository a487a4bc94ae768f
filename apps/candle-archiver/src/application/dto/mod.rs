//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for use case outputs and the binary's response.

mod batch_dto;

pub use batch_dto::{
    BatchReportDto, InvocationResponseDto, SUCCESS_BODY, SymbolOutcome, SymbolReportDto,
};
