//! Join aggregations over `customer_details` and `product_details`.

use super::CatalogEntry;

pub(super) const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "category_order_counts",
        title: "Number of Orders per Product Category",
        sql: "
            SELECT pd.category, COUNT(cd.order_id) AS total_orders
            FROM product_details pd
            JOIN customer_details cd ON pd.product_id = cd.product_id
            GROUP BY pd.category
            ORDER BY total_orders DESC",
        columns: &["Category", "Total Orders"],
        description: "Orders counted per product category",
    },
    CatalogEntry {
        id: "region_product_avg_quantity",
        title: "Average Quantity Sold per Product in Each Region",
        sql: "
            SELECT cd.region, pd.product_id, AVG(pd.quantity) AS avg_quantity_sold
            FROM customer_details cd
            JOIN product_details pd ON cd.product_id = pd.product_id
            GROUP BY cd.region, pd.product_id
            ORDER BY avg_quantity_sold DESC",
        columns: &["Region", "Product ID", "Avg Quantity Sold"],
        description: "Mean units per order for each region and product pair",
    },
    CatalogEntry {
        id: "top_profit_products_with_region",
        title: "Top 5 Products with the Highest Profit, Including their Region",
        // Ungrouped: a product ordered several times can fill more than one slot.
        sql: "
            SELECT pd.product_id, pd.profit, cd.region, cd.order_date
            FROM product_details pd
            JOIN customer_details cd ON pd.product_id = cd.product_id
            ORDER BY pd.profit DESC
            LIMIT 5",
        columns: &["Product ID", "Profit", "Region", "Order Date"],
        description: "The five most profitable order lines with where and when they were placed",
    },
    CatalogEntry {
        id: "product_order_counts",
        title: "Total Number of Orders per Product",
        sql: "
            SELECT pd.product_id, COUNT(cd.order_id) AS order_count
            FROM product_details pd
            JOIN customer_details cd ON pd.product_id = cd.product_id
            GROUP BY pd.product_id
            ORDER BY order_count DESC",
        columns: &["Product ID", "Order Count"],
        description: "Orders counted per product",
    },
    CatalogEntry {
        id: "top_region_product_revenue",
        title: "Region with the Highest Total Revenue for Each Product",
        sql: "
            SELECT cd.region, pd.product_id, SUM(pd.sale_price * pd.quantity) AS total_revenue
            FROM customer_details cd
            JOIN product_details pd ON cd.product_id = pd.product_id
            GROUP BY cd.region, pd.product_id
            ORDER BY total_revenue DESC
            LIMIT 1",
        columns: &["Region", "Product ID", "Total Revenue"],
        description: "The single region and product pair with the highest revenue",
    },
    CatalogEntry {
        id: "top_city_discounts",
        title: "Top 3 Cities with Highest Discount",
        sql: "
            WITH ranked_cities AS (
                SELECT cd.city,
                       pd.product_id,
                       pd.discount_percent AS highest_discount_percent,
                       ROW_NUMBER() OVER (
                           PARTITION BY cd.city
                           ORDER BY pd.discount_percent DESC
                       ) AS rank_within_city
                FROM customer_details cd
                JOIN product_details pd ON cd.product_id = pd.product_id
            )
            SELECT city, product_id, highest_discount_percent
            FROM ranked_cities
            WHERE rank_within_city = 1
            ORDER BY highest_discount_percent DESC
            LIMIT 3",
        columns: &["City", "Product ID", "Highest Discount Percent"],
        description: "Each city's most discounted product, top 3 cities by that discount",
    },
    CatalogEntry {
        id: "region_cost_and_profit",
        title: "Total Cost Price and Total Profit for Each Region",
        sql: "
            SELECT cd.region,
                   SUM(pd.cost_price * pd.quantity) AS total_cost_price,
                   SUM(pd.profit * pd.quantity) AS total_profit
            FROM customer_details cd
            JOIN product_details pd ON cd.product_id = pd.product_id
            GROUP BY cd.region
            ORDER BY total_profit DESC",
        columns: &["Region", "Total Cost Price", "Total Profit"],
        description: "Cost and profit scaled by quantity, summed per region",
    },
    CatalogEntry {
        id: "category_avg_profit_margin",
        title: "Average Profit Margin per Product Category",
        // Zero-cost lines have no margin; a category made only of them yields no row.
        sql: "
            SELECT pd.category,
                   AVG(pd.profit * 100.0 / pd.cost_price) AS avg_profit_margin
            FROM product_details pd
            JOIN customer_details cd ON pd.product_id = cd.product_id
            WHERE pd.cost_price <> 0
            GROUP BY pd.category
            ORDER BY avg_profit_margin DESC",
        columns: &["Category", "Avg Profit Margin"],
        description: "Mean of profit over cost price as a percentage, per category",
    },
    CatalogEntry {
        id: "furniture_total_quantity",
        title: "Total Quantity of Orders in Furniture Products",
        sql: "
            SELECT SUM(pd.quantity) AS total_quantity
            FROM customer_details cd
            JOIN product_details pd ON cd.product_id = pd.product_id
            WHERE pd.category = 'Furniture'",
        columns: &["Total Quantity"],
        description: "Units ordered across all Furniture orders",
    },
    CatalogEntry {
        id: "high_profit_products",
        title: "Product that Gives Profit More Than 1000",
        sql: "
            SELECT cd.region, pd.product_id, pd.sale_price, pd.cost_price, pd.profit
            FROM product_details pd
            JOIN customer_details cd ON pd.product_id = cd.product_id
            WHERE pd.profit > 1000
            ORDER BY cd.region, pd.product_id",
        columns: &["Region", "Product ID", "Sale Price", "Cost Price", "Profit"],
        description: "Order lines whose product earns more than 1000 profit",
    },
];
