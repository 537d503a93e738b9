pub mod purchase_plan;
