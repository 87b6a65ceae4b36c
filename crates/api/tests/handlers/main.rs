mod health_test;
mod middleware_test;
mod sections_test;
mod test_utils;
mod timetable_test;
