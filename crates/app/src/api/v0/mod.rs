pub mod eacl;
