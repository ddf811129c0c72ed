//! Core types for the FlashFood admin dashboard.
//!
//! This module provides type-safe wrappers and DTOs for the backend's
//! entities.

pub mod common;
pub mod complaint;
pub mod customer;
pub mod customer_care;
pub mod envelope;
pub mod faq;
pub mod id;
pub mod money;
pub mod order;
pub mod status;

pub use common::{ContactEmail, ContactPhone, EpochSeconds, ImageRef, PersonSnapshot, full_name};
pub use complaint::{ComplaintHistory, ComplaintOrder};
pub use customer::{
    Address, Customer, CustomerStatus, INACTIVITY_THRESHOLD_SECS, LinkedUser, UserSearchResult,
    UserSearchResults,
};
pub use customer_care::{CustomerCareRep, RepEmail};
pub use envelope::{Envelope, EnvelopeError, Page, PageRequest};
pub use faq::{AnswerBlock, AnswerKind, Faq, FaqPayload, UploadedImage};
pub use id::*;
pub use money::Money;
pub use order::{
    Order, OrderCustomer, OrderDriver, OrderItem, OrderRestaurant, OrderedMenuItem,
    RestaurantStatus, Vehicle,
};
pub use status::*;
