// src/lib.rs

//! Núcleo de agendamento de plantões hospitalares: ciclo de vida de
//! plantões e aceites, projeções de histórico por papel e trilha de
//! auditoria imutável. A camada HTTP é uma colaboradora externa que
//! consome o [`config::AppState`].

pub mod auditoria;
pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
