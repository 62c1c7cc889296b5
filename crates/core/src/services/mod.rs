//! Business logic services.

#![allow(missing_docs)]

pub mod alarm_gateway;
pub mod love;
pub mod picture_gateway;
pub mod user;

pub use alarm_gateway::{AlarmCreate, AlarmGateway, AlarmGatewayService, NoOpAlarmGateway};
pub use love::{
    DeactivationOutcome, LoveCheckItem, LoveCheckResult, LoveService, SideEffect, ToggleAction,
    ToggleOutcome,
};
pub use picture_gateway::{
    NoOpPictureGateway, PictureGateway, PictureGatewayService, PictureSummary,
};
pub use user::{EnrollUserInput, UpdateUserInput, UserService};
