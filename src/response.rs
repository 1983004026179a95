//! Per-endpoint output shapes and status helpers.
//!
//! Each shape nests at most one level, so the camper/activity/signup graph never recurses:
//! summaries carry no `signups`, and the signup nested under a camper carries only its activity.

use crate::model::{Activity, Camper, Signup};
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CamperSummary {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

/// A signup as seen from its camper.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CamperSignup {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub activity: ActivitySummary,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CamperDetail {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub signups: Vec<CamperSignup>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SignupDetail {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub camper: CamperSummary,
    pub activity: ActivitySummary,
}

impl From<Camper> for CamperSummary {
    fn from(c: Camper) -> Self {
        Self {
            id: c.id,
            name: c.name,
            age: c.age,
        }
    }
}

impl From<Activity> for ActivitySummary {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id,
            name: a.name,
            difficulty: a.difficulty,
        }
    }
}

impl From<(Signup, Activity)> for CamperSignup {
    fn from((s, a): (Signup, Activity)) -> Self {
        Self {
            id: s.id,
            time: s.time,
            camper_id: s.camper_id,
            activity_id: s.activity_id,
            activity: a.into(),
        }
    }
}

impl CamperDetail {
    pub fn new(camper: Camper, signups: Vec<(Signup, Activity)>) -> Self {
        Self {
            id: camper.id,
            name: camper.name,
            age: camper.age,
            signups: signups.into_iter().map(CamperSignup::from).collect(),
        }
    }
}

impl SignupDetail {
    pub fn new(signup: Signup, camper: Camper, activity: Activity) -> Self {
        Self {
            id: signup.id,
            time: signup.time,
            camper_id: signup.camper_id,
            activity_id: signup.activity_id,
            camper: camper.into(),
            activity: activity.into(),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn accepted<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::ACCEPTED, Json(data))
}
