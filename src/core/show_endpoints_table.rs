use prettytable::{format, row, Cell, Row, Table};
use crate::models::endpoint::Endpoint;

pub(crate) fn show_endpoints_table(endpoints: &[Endpoint]) {
    if endpoints.is_empty() {
        println!("没有发现任何端点");
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    table.add_row(row!["方法", "地址", "状态码", "需要鉴权", "描述来源"]);
    for e in endpoints {
        let auth = match e.is_authenticated {
            Some(true) => "是",
            Some(false) => "否",
            None => "-",
        };
        table.add_row(Row::new(vec![
            Cell::new(&e.method),
            Cell::new(&e.url),
            Cell::new(format!("{:03}", e.status_code).as_str()),
            Cell::new(auth),
            Cell::new(e.spec_source.as_deref().unwrap_or("-")),
        ]));
    }
    println!("发现结果:");
    table.printstd();
}
