mod crawler;

pub use crawler::AopsCrawler;
