//! HTTP handlers

pub mod health;
pub mod menus;
pub mod pages;
