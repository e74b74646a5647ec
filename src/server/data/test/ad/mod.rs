use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::ad::AdFactory};

use crate::server::{
    data::ad::AdRepository,
    model::ad::{AdStatus, ListAdsFilter, OwnerKey},
};

mod count;
mod find_active;
mod find_by_owner;
mod find_by_username;
mod find_premium_active;
