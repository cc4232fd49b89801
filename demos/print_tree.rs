use avl_insert::Tree;

fn main() {
    let mut tree = Tree::new();
    for key in [30, 10, 20, 40, 50, 25] {
        tree.insert(key);
    }

    println!("Sideways:");
    print!("{}", tree.display());

    print!("\nInorder: ");
    for key in &tree {
        print!("{key} ");
    }
    println!();
}
