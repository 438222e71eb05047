pub mod cuisine_filter;
pub mod ranking_table;
pub mod rankings_page;
pub mod user_ranking_list;
pub mod user_rankings_page;
