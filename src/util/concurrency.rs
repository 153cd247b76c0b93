pub mod pools;
