//! vpcflow core
//!
//! VPC ネットワークトポロジーを型付きの値として宣言・検証するクレート。
//!
//! ```text
//! topology.kdl ──parser──▶ TopologyLayout ──describe()──▶ Topology ──validate()──▶ ValidationReport
//! ```
//!
//! - [`TopologyLayout`]: 名前プレフィックス・VPC CIDR・ゾーンごとの CIDR
//! - [`describe`]: レイアウトから VPC / IGW / サブネット / ルートテーブル / NAT を宣言する純粋関数
//! - [`TopologyBuilder`]: 宣言ごとに型付きハンドルを返すビルダー
//! - [`validate`]: ルーティングとアドレスの不変条件をすべて検査する
//!
//! # Examples
//!
//! ```rust
//! use vpcflow_core::{TopologyLayout, describe, validate};
//!
//! let topology = describe(&TopologyLayout::default());
//! assert_eq!(topology.len(), 23);
//! assert!(validate(&topology).is_ok());
//! ```

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod invariants;
pub mod layout;
pub mod loader;
pub mod model;
pub mod parser;

pub use builder::TopologyBuilder;
pub use descriptor::describe;
pub use error::{Result, TopologyError};
pub use invariants::{ValidationReport, Violation, validate};
pub use layout::{DEFAULT_PROJECT, TopologyLayout, ZoneLayout, default_stack_name, to_pascal_case};
pub use loader::{load_layout, load_layout_or_default};
pub use model::*;
pub use parser::{parse_layout_file, parse_layout_string};
