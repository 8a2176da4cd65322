pub mod a001_order_line;
