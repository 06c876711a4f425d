mod common;
mod inquiries;
mod routing;
