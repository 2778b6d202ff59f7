// Example: a grouped, sorted, searchable product table windowed into a
// 400px "viewport", driven entirely from code.
use datatable::{
    BodyState, Column, SortItem, TableOptions, Value, VirtualTable, VisibleEntryKind,
};

#[derive(Clone, Debug)]
struct Product {
    id: u64,
    name: String,
    category: &'static str,
    price: f64,
}

fn print_frame(vt: &VirtualTable<Product>) {
    let frame = vt.frame();
    println!("-- padding_top={}px", frame.padding_top);
    match frame.body {
        BodyState::Entries(entries) => {
            for entry in entries {
                match entry.kind {
                    VisibleEntryKind::GroupHeader { header, open } => {
                        let marker = if open { "v" } else { ">" };
                        println!("[{}] {} = {}", marker, header.grouped_by, header.key);
                    }
                    VisibleEntryKind::Row {
                        row_index,
                        selected,
                        ..
                    } => {
                        let product = vt.table().raw(row_index).unwrap();
                        let marker = if selected { "*" } else { " " };
                        println!(" {marker}  {} ({})", product.name, product.price);
                    }
                }
            }
        }
        BodyState::Loading { text } | BodyState::NoData { text } => println!("   {text}"),
    }
    println!("-- padding_bottom={}px", frame.padding_bottom);
}

fn main() {
    let categories = ["tools", "hardware", "garden", "paint"];
    let items: Vec<Product> = (0..10_000)
        .map(|i| Product {
            id: i,
            name: format!("product-{i:05}"),
            category: categories[(i % 4) as usize],
            price: (i % 97) as f64 + 0.5,
        })
        .collect();

    let columns = vec![
        Column::new("name", |p: &Product| Value::from(p.name.clone())).with_title("Name"),
        Column::new("category", |p: &Product| Value::from(p.category)).with_title("Category"),
        Column::new("price", |p: &Product| Value::from(p.price)).with_title("Price"),
    ];

    let mut vt = VirtualTable::new(
        TableOptions::new(items, columns)
            .with_item_key(|_, p: &Product| p.id)
            .with_group_by(vec![SortItem::asc("category")])
            .with_sort_by(vec![SortItem::asc("name")])
            .with_estimated_row_height(32)
            .with_container_height(400),
    );

    println!("== initial frame ==");
    print_frame(&vt);

    vt.select(42, true);
    vt.handle_scroll(3_200);
    println!("\n== after scrolling to 3200px ==");
    print_frame(&vt);

    vt.set_search("product-0004");
    println!("\n== after searching \"product-0004\" ==");
    print_frame(&vt);
}
