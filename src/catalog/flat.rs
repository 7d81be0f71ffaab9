//! Aggregations over the flat `orders` table.

use super::CatalogEntry;

pub(super) const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        id: "top_revenue_products",
        title: "Top 10 Highest Revenue Generating Products",
        sql: "
            WITH ranked_products AS (
                SELECT product_id,
                       SUM(sale_price * quantity) AS total_revenue,
                       ROW_NUMBER() OVER (ORDER BY SUM(sale_price * quantity) DESC) AS rank
                FROM orders
                GROUP BY product_id
            )
            SELECT product_id, total_revenue
            FROM ranked_products
            WHERE rank <= 10
            ORDER BY rank",
        columns: &["Product ID", "Total Revenue"],
        description: "Sale price times quantity, summed per product",
    },
    CatalogEntry {
        id: "city_profit_margins",
        title: "Cities with the Highest Profit Margins",
        // Cities without positive sales have no defined margin.
        sql: "
            SELECT city,
                   SUM(profit) * 100.0 / SUM(sale_price) AS profit_margin
            FROM orders
            GROUP BY city
            HAVING SUM(sale_price) > 0
            ORDER BY profit_margin DESC
            LIMIT 5",
        columns: &["City", "Profit Margin"],
        description: "Total profit as a percentage of total sale price, top 5 cities",
    },
    CatalogEntry {
        id: "category_discounts",
        title: "Total Discount Given for Each Category",
        sql: "
            SELECT category,
                   SUM(discount) AS total_discount
            FROM orders
            GROUP BY category
            ORDER BY total_discount DESC",
        columns: &["Category", "Total Discount"],
        description: "Discount amounts summed per category",
    },
    CatalogEntry {
        id: "category_avg_sale_price",
        title: "Average Sale Price Per Product Category",
        sql: "
            SELECT category,
                   AVG(sale_price) AS average_sale_price
            FROM orders
            GROUP BY category",
        columns: &["Category", "Average Sale Price"],
        description: "Mean sale price of order lines per category",
    },
    CatalogEntry {
        id: "top_region_avg_sale_price",
        title: "Region with the Highest Average Sale Price",
        sql: "
            WITH ranked_regions AS (
                SELECT region,
                       AVG(sale_price) AS average_sale_price,
                       ROW_NUMBER() OVER (ORDER BY AVG(sale_price) DESC) AS rank
                FROM orders
                GROUP BY region
            )
            SELECT region, average_sale_price
            FROM ranked_regions
            WHERE rank = 1",
        columns: &["Region", "Average Sale Price"],
        description: "The single region with the highest mean sale price",
    },
    CatalogEntry {
        id: "category_profit",
        title: "Total Profit per Category",
        sql: "
            SELECT category,
                   SUM(profit) AS total_profit
            FROM orders
            GROUP BY category
            ORDER BY total_profit DESC",
        columns: &["Category", "Total Profit"],
        description: "Profit summed per category",
    },
    CatalogEntry {
        id: "top_segments_by_quantity",
        title: "Top 3 Highest Quantity of Orders by Segment",
        sql: "
            SELECT segment,
                   SUM(quantity) AS total_quantity
            FROM orders
            GROUP BY segment
            ORDER BY total_quantity DESC
            LIMIT 3",
        columns: &["Segment", "Total Quantity"],
        description: "Units ordered per customer segment, top 3",
    },
    CatalogEntry {
        id: "region_avg_discount",
        title: "Average Discount Percentage per Region",
        sql: "
            SELECT region,
                   AVG(discount_percent) AS avg_discount_percentage
            FROM orders
            GROUP BY region",
        columns: &["Region", "Avg Discount Percentage"],
        description: "Mean discount percentage per region",
    },
    CatalogEntry {
        id: "top_profit_category",
        title: "Product Category with Highest Total Profit",
        sql: "
            SELECT category,
                   SUM(profit) AS total_profit
            FROM orders
            GROUP BY category
            ORDER BY total_profit DESC
            LIMIT 1",
        columns: &["Category", "Total Profit"],
        description: "The single most profitable category",
    },
    CatalogEntry {
        id: "yearly_revenue",
        title: "Total Revenue by Year",
        sql: "
            SELECT strftime('%Y', order_date) AS year,
                   SUM(sale_price * quantity) AS total_revenue
            FROM orders
            GROUP BY year
            ORDER BY year",
        columns: &["Year", "Total Revenue"],
        description: "Sale price times quantity, summed per calendar year of the order date",
    },
];
